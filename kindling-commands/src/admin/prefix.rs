use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::admin::changelog::send_to_changelog;
use crate::checks::can_change_prefix;
use kindling_core::{Context, Error};
use kindling_database::impls::settings::set_prefix;
use kindling_utils::embed::{PREFIX_COLOR, error_embed};
use kindling_utils::parse::validate_prefix;

pub const META: CommandMeta = CommandMeta {
    name: "prefix",
    desc: "Change the bot prefix.",
    category: "administration",
    usage: "prefix <new prefix>",
};

#[poise::command(
    prefix_command,
    slash_command,
    category = "Administration",
    guild_only,
    check = "can_change_prefix"
)]
pub async fn prefix(
    ctx: Context<'_>,
    #[description = "New prefix (1-16 ASCII letters, digits or punctuation)"] new_prefix: String,
) -> Result<(), Error> {
    if let Err(invalid) = validate_prefix(&new_prefix) {
        ctx.send(poise::CreateReply::default().embed(error_embed(invalid.to_string())))
            .await?;
        return Ok(());
    }

    set_prefix(&ctx.data().db, &new_prefix).await?;

    let embed = serenity::CreateEmbed::new()
        .title("Prefix")
        .description("Prefix has been updated.")
        .color(PREFIX_COLOR);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    send_to_changelog(
        ctx.http(),
        &ctx.data().db,
        format!("Bot prefix has been changed to `{}`", new_prefix),
    )
    .await;

    Ok(())
}
