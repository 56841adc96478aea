use std::collections::BTreeSet;

use kindling_core::{Data, Error};

use crate::{access, admin, messagelog, owner, utility};

/// Named group of commands and event handlers that can be switched off.
pub struct Cog {
    pub name: &'static str,
    pub description: &'static str,
    /// Required cogs ignore `DISABLED_COGS`.
    pub required: bool,
    pub command_names: &'static [&'static str],
    pub commands: fn() -> Vec<poise::Command<Data, Error>>,
}

pub const CORE_COG: &str = "core";
pub const MESSAGE_LOG_COG: &str = "messagelog";
pub const PERMISSIONS_COG: &str = "permissions";
pub const SETTINGS_COG: &str = "settings";

pub const COGS: &[Cog] = &[
    Cog {
        name: CORE_COG,
        description: "Built-in commands.",
        required: true,
        command_names: &[
            "ping", "help", "version", "info", "github", "prefix", "reload", "stop", "kill",
        ],
        commands: core_commands,
    },
    Cog {
        name: MESSAGE_LOG_COG,
        description: "Records every non-command message.",
        required: false,
        command_names: &["userlog"],
        commands: message_log_commands,
    },
    Cog {
        name: PERMISSIONS_COG,
        description: "Inspect and override permission levels.",
        required: false,
        command_names: &["permissions", "setlevel"],
        commands: permissions_commands,
    },
    Cog {
        name: SETTINGS_COG,
        description: "Role bindings, changelog channel and configuration overview.",
        required: false,
        command_names: &["roles", "changelogchannel", "admininfo"],
        commands: settings_commands,
    },
];

fn core_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        utility::version::version(),
        utility::info::info(),
        utility::github::github(),
        admin::prefix::prefix(),
        owner::reload::reload(),
        owner::stop::stop(),
        owner::kill::kill(),
    ]
}

fn message_log_commands() -> Vec<poise::Command<Data, Error>> {
    vec![messagelog::userlog::userlog()]
}

fn permissions_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        access::permissions::permissions(),
        access::setlevel::setlevel(),
    ]
}

fn settings_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        admin::roles::roles(),
        admin::changelogchannel::changelogchannel(),
        admin::admininfo::admininfo(),
    ]
}

/// Split [`COGS`] into enabled cogs and the names that were disabled.
///
/// `disabled` is the raw comma-separated `DISABLED_COGS` value.
pub fn partition_cogs(disabled: &str) -> (Vec<&'static Cog>, BTreeSet<String>) {
    let blacklist: BTreeSet<String> = disabled
        .split(',')
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut enabled = Vec::new();
    let mut skipped = BTreeSet::new();

    for cog in COGS {
        if !cog.required && blacklist.contains(cog.name) {
            skipped.insert(cog.name.to_owned());
        } else {
            enabled.push(cog);
        }
    }

    (enabled, skipped)
}

pub fn commands(enabled: &[&Cog]) -> Vec<poise::Command<Data, Error>> {
    enabled.iter().flat_map(|cog| (cog.commands)()).collect()
}

/// Whether `command_name` belongs to one of the `enabled` cog names.
pub fn command_enabled(enabled: &BTreeSet<&'static str>, command_name: &str) -> bool {
    COGS.iter()
        .filter(|cog| enabled.contains(cog.name))
        .any(|cog| cog.command_names.contains(&command_name))
}
