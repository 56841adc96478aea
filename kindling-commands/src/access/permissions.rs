use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::checks::{author_actor, can_view_own_permissions, deny, has_permission};
use kindling_core::{Context, Error};
use kindling_database::Database;
use kindling_utils::embed::PERMISSIONS_COLOR;
use kindling_utils::permissions::{
    Permission, PermissionLevel, effective_level, resolve_permission_level,
};

pub const META: CommandMeta = CommandMeta {
    name: "permissions",
    desc: "Show your permission level, or every permission with `list`.",
    category: "permissions",
    usage: "permissions [list]",
};

#[poise::command(
    prefix_command,
    slash_command,
    category = "Permissions",
    check = "can_view_own_permissions"
)]
pub async fn permissions(
    ctx: Context<'_>,
    #[description = "`list` to show every permission"] mode: Option<String>,
) -> Result<(), Error> {
    let db = &ctx.data().db;
    let levels = effective_levels(db).await?;

    let list_all = mode
        .as_deref()
        .is_some_and(|mode| mode.trim().eq_ignore_ascii_case("list"));

    let embed = if list_all {
        if !has_permission(ctx, Permission::ViewAllPermissions).await? {
            return deny(ctx).await;
        }

        serenity::CreateEmbed::new()
            .title("Permissions")
            .description(permission_table(&levels))
            .color(PERMISSIONS_COLOR)
    } else {
        let actor = author_actor(ctx).await?;
        let level = resolve_permission_level(&actor, db).await?;
        let held = held_permissions(level, &levels);

        let held_text = if held.is_empty() {
            "None".to_owned()
        } else {
            held.iter()
                .map(|permission| format!("`{}`", permission.name()))
                .collect::<Vec<_>>()
                .join(", ")
        };

        serenity::CreateEmbed::new()
            .title("Your Permissions")
            .field("Permission Level", level.name(), false)
            .field("Granted Permissions", held_text, false)
            .color(PERMISSIONS_COLOR)
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Current threshold of every permission, overrides included.
pub async fn effective_levels(db: &Database) -> Result<Vec<(Permission, PermissionLevel)>, Error> {
    let mut levels = Vec::with_capacity(Permission::ALL.len());
    for permission in Permission::ALL {
        levels.push((permission, effective_level(permission, db).await?));
    }
    Ok(levels)
}

fn held_permissions(
    level: PermissionLevel,
    levels: &[(Permission, PermissionLevel)],
) -> Vec<Permission> {
    levels
        .iter()
        .filter(|(_, required)| level >= *required)
        .map(|(permission, _)| *permission)
        .collect()
}

/// Permissions grouped under their required level, highest level first.
fn permission_table(levels: &[(Permission, PermissionLevel)]) -> String {
    let mut sections = Vec::new();

    for level in PermissionLevel::ALL.into_iter().rev() {
        let lines = levels
            .iter()
            .filter(|(_, required)| *required == level)
            .map(|(permission, _)| format!("`{}` - {}", permission.name(), permission.description()))
            .collect::<Vec<_>>();

        if !lines.is_empty() {
            sections.push(format!("**{}**\n{}", level, lines.join("\n")));
        }
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::{held_permissions, permission_table};
    use kindling_utils::permissions::{Permission, PermissionLevel};

    fn sample() -> Vec<(Permission, PermissionLevel)> {
        vec![
            (Permission::ChangePrefix, PermissionLevel::Administrator),
            (Permission::ViewOwnPermissions, PermissionLevel::Public),
            (Permission::ViewUserlog, PermissionLevel::Moderator),
        ]
    }

    #[test]
    fn higher_levels_hold_lower_permissions() {
        assert_eq!(
            held_permissions(PermissionLevel::Moderator, &sample()),
            vec![Permission::ViewOwnPermissions, Permission::ViewUserlog]
        );
        assert_eq!(held_permissions(PermissionLevel::Owner, &sample()).len(), 3);
        assert_eq!(
            held_permissions(PermissionLevel::Public, &sample()),
            vec![Permission::ViewOwnPermissions]
        );
    }

    #[test]
    fn table_lists_highest_level_first() {
        let table = permission_table(&sample());
        let admin = table.find("**ADMINISTRATOR**");
        let public = table.find("**PUBLIC**");
        assert!(admin.is_some() && public.is_some());
        assert!(admin < public);
        assert!(!table.contains("**OWNER**"));
        assert!(table.contains("`change_prefix` - change the bot prefix"));
    }
}
