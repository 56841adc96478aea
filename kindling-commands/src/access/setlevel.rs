use crate::CommandMeta;
use crate::admin::changelog::send_to_changelog;
use crate::checks::is_owner;
use kindling_core::{Context, Error};
use kindling_database::impls::settings::{delete_setting, set_setting};
use kindling_utils::permissions::{Permission, PermissionLevel};

pub const META: CommandMeta = CommandMeta {
    name: "setlevel",
    desc: "Override the level required for a permission.",
    category: "permissions",
    usage: "setlevel <permission> <level|reset>",
};

#[derive(Debug, PartialEq, Eq)]
enum LevelChange {
    Set(PermissionLevel),
    Reset,
}

#[poise::command(
    prefix_command,
    slash_command,
    category = "Permissions",
    check = "is_owner"
)]
pub async fn setlevel(
    ctx: Context<'_>,
    #[description = "Permission name, e.g. change_prefix"] permission: String,
    #[description = "public, supporter, moderator, administrator, owner or reset"] level: String,
) -> Result<(), Error> {
    let Some(permission) = Permission::from_name(&permission) else {
        let names = Permission::ALL
            .iter()
            .map(|permission| format!("`{}`", permission.name()))
            .collect::<Vec<_>>()
            .join(", ");
        ctx.say(format!("Unknown permission. Valid permissions: {}", names))
            .await?;
        return Ok(());
    };

    let change = match parse_level_change(&level) {
        Ok(change) => change,
        Err(message) => {
            ctx.say(message).await?;
            return Ok(());
        }
    };

    let db = &ctx.data().db;
    let key = permission.settings_key();
    let summary = match change {
        LevelChange::Set(level) => {
            set_setting(db, &key, &level).await?;
            format!("Permission `{}` now requires {}.", permission.name(), level)
        }
        LevelChange::Reset => {
            delete_setting(db, &key).await?;
            format!(
                "Permission `{}` reset to its default ({}).",
                permission.name(),
                permission.default_level()
            )
        }
    };

    ctx.say(&summary).await?;
    send_to_changelog(ctx.http(), db, summary).await;
    Ok(())
}

fn parse_level_change(raw: &str) -> Result<LevelChange, String> {
    if raw.trim().eq_ignore_ascii_case("reset") {
        return Ok(LevelChange::Reset);
    }

    raw.parse::<PermissionLevel>()
        .map(LevelChange::Set)
        .map_err(|error| format!("{}. Use a level name or `reset`.", error))
}

#[cfg(test)]
mod tests {
    use super::{LevelChange, parse_level_change};
    use kindling_utils::permissions::PermissionLevel;

    #[test]
    fn parses_levels_and_reset() {
        assert_eq!(
            parse_level_change("mod"),
            Ok(LevelChange::Set(PermissionLevel::Moderator))
        );
        assert_eq!(parse_level_change(" RESET "), Ok(LevelChange::Reset));
        assert!(parse_level_change("root").is_err());
    }
}
