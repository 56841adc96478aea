use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::checks::can_view_admininfo;
use kindling_core::{Context, Error};
use kindling_database::impls::settings::{get_changelog_channel_id, get_prefix};
use kindling_utils::embed::INFO_COLOR;
use kindling_utils::formatting::{channel_mention, role_mention};
use kindling_utils::permissions::{ADMIN_ROLE_KEY, MOD_ROLE_KEY, SUPP_ROLE_KEY, SettingsStore};

pub const META: CommandMeta = CommandMeta {
    name: "admininfo",
    desc: "Show the current bot configuration.",
    category: "administration",
    usage: "admininfo",
};

#[poise::command(
    prefix_command,
    slash_command,
    category = "Administration",
    check = "can_view_admininfo"
)]
pub async fn admininfo(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let db = &data.db;

    let prefix = get_prefix(db).await?;
    let admin_role = db.get::<u64>(ADMIN_ROLE_KEY).await?;
    let mod_role = db.get::<u64>(MOD_ROLE_KEY).await?;
    let supp_role = db.get::<u64>(SUPP_ROLE_KEY).await?;
    let changelog = get_changelog_channel_id(db).await?;

    let enabled = data.enabled_cogs.iter().copied().collect::<Vec<_>>().join(", ");
    let disabled = if data.disabled_cogs.is_empty() {
        "None".to_owned()
    } else {
        data.disabled_cogs
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let embed = serenity::CreateEmbed::new()
        .title("Admin Information")
        .color(INFO_COLOR)
        .field("Prefix", format!("`{}`", prefix), true)
        .field("Changelog Channel", channel_mention(changelog), true)
        .field("Administrator Role", role_mention(admin_role), false)
        .field("Moderator Role", role_mention(mod_role), true)
        .field("Supporter Role", role_mention(supp_role), true)
        .field("Enabled Cogs", enabled, false)
        .field("Disabled Cogs", disabled, false);

    ctx.send(poise::CreateReply::default().ephemeral(true).embed(embed))
        .await?;
    Ok(())
}
