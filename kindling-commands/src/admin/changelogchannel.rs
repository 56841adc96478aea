use crate::CommandMeta;
use crate::checks::can_configure_changelog;
use kindling_core::{Context, Error};
use kindling_database::impls::settings::{
    clear_changelog_channel_id, get_changelog_channel_id, set_changelog_channel_id,
};
use kindling_utils::parse::parse_channel_id;

pub const META: CommandMeta = CommandMeta {
    name: "changelogchannel",
    desc: "Set or view the changelog channel.",
    category: "administration",
    usage: "changelogchannel [#channel|channel_id|clear]",
};

#[poise::command(
    prefix_command,
    slash_command,
    category = "Administration",
    guild_only,
    check = "can_configure_changelog"
)]
pub async fn changelogchannel(
    ctx: Context<'_>,
    #[description = "Channel mention/id, or 'clear'"]
    #[rest]
    input: Option<String>,
) -> Result<(), Error> {
    if let Some(input) = input
        .as_deref()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
    {
        if input.eq_ignore_ascii_case("clear") {
            clear_changelog_channel_id(&ctx.data().db).await?;
            ctx.say("Changelog channel cleared.").await?;
            return Ok(());
        }

        if let Some(channel_id) = parse_channel_id(input) {
            set_changelog_channel_id(&ctx.data().db, channel_id).await?;
            ctx.say(format!("Changelog channel set to <#{}>.", channel_id))
                .await?;
            return Ok(());
        }

        ctx.say("Provide a valid channel mention/id, or `clear`.")
            .await?;
        return Ok(());
    }

    let current = get_changelog_channel_id(&ctx.data().db).await?;
    if let Some(channel_id) = current {
        ctx.say(format!("Current changelog channel: <#{}>", channel_id))
            .await?;
    } else {
        ctx.say("No changelog channel configured.").await?;
    }

    Ok(())
}
