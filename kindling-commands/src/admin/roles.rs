use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::admin::changelog::send_to_changelog;
use crate::checks::can_configure_roles;
use kindling_core::{Context, Error};
use kindling_database::impls::settings::{delete_setting, set_setting};
use kindling_utils::embed::DEFAULT_EMBED_COLOR;
use kindling_utils::formatting::role_mention;
use kindling_utils::parse::parse_role_id;
use kindling_utils::permissions::{
    ADMIN_ROLE_KEY, MOD_ROLE_KEY, SUPP_ROLE_KEY, PermissionLevel, SettingsStore,
};

pub const META: CommandMeta = CommandMeta {
    name: "roles",
    desc: "View or change the roles granting permission levels.",
    category: "administration",
    usage: "roles [admin|mod|supp] [@role|role_id|clear]",
};

/// Settings key and granted level for each configurable role category.
const ROLE_CATEGORIES: [(&str, &str, PermissionLevel); 3] = [
    ("admin", ADMIN_ROLE_KEY, PermissionLevel::Administrator),
    ("mod", MOD_ROLE_KEY, PermissionLevel::Moderator),
    ("supp", SUPP_ROLE_KEY, PermissionLevel::Supporter),
];

#[poise::command(
    prefix_command,
    slash_command,
    category = "Administration",
    guild_only,
    check = "can_configure_roles"
)]
pub async fn roles(
    ctx: Context<'_>,
    #[description = "admin, mod or supp"] category: Option<String>,
    #[description = "Role mention/id, or 'clear'"]
    #[rest]
    input: Option<String>,
) -> Result<(), Error> {
    let db = &ctx.data().db;

    let Some(category) = category else {
        let mut lines = Vec::with_capacity(ROLE_CATEGORIES.len());
        for (_, key, level) in ROLE_CATEGORIES {
            let role_id = db.get::<u64>(key).await?;
            lines.push(format!("**{}:** {}", level, role_mention(role_id)));
        }

        let embed = serenity::CreateEmbed::new()
            .title("Permission Roles")
            .description(lines.join("\n"))
            .color(DEFAULT_EMBED_COLOR);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    let Some((key, level)) = role_category(&category) else {
        ctx.say("Unknown role category. Use `admin`, `mod` or `supp`.")
            .await?;
        return Ok(());
    };

    let Some(input) = input
        .as_deref()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
    else {
        let role_id = db.get::<u64>(key).await?;
        ctx.say(format!("{} role: {}", level, role_mention(role_id)))
            .await?;
        return Ok(());
    };

    if input.eq_ignore_ascii_case("clear") {
        delete_setting(db, key).await?;
        ctx.say(format!("{} role cleared.", level)).await?;
        send_to_changelog(
            ctx.http(),
            db,
            format!("{} role has been cleared.", level),
        )
        .await;
        return Ok(());
    }

    let Some(role_id) = parse_role_id(input) else {
        ctx.say("Provide a valid role mention/id, or `clear`.")
            .await?;
        return Ok(());
    };

    set_setting(db, key, &role_id).await?;
    ctx.say(format!("{} role set to <@&{}>.", level, role_id))
        .await?;
    send_to_changelog(
        ctx.http(),
        db,
        format!("{} role has been set to <@&{}>.", level, role_id),
    )
    .await;

    Ok(())
}

fn role_category(raw: &str) -> Option<(&'static str, PermissionLevel)> {
    let wanted = raw.trim().to_ascii_lowercase();
    ROLE_CATEGORIES
        .into_iter()
        .find(|(name, _, level)| *name == wanted || level.name().eq_ignore_ascii_case(&wanted))
        .map(|(_, key, level)| (key, level))
}
