pub mod access;
pub mod admin;
pub mod checks;
pub mod cogs;
pub mod messagelog;
pub mod owner;
pub mod status;
pub mod utility;

#[derive(Debug, PartialEq, Eq)]
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    /// Usage without the command prefix.
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::version::META,
    utility::info::META,
    utility::github::META,
    admin::prefix::META,
    admin::roles::META,
    admin::changelogchannel::META,
    admin::admininfo::META,
    access::permissions::META,
    access::setlevel::META,
    messagelog::userlog::META,
    owner::reload::META,
    owner::stop::META,
    owner::kill::META,
];

/// Metadata for a command name, case-insensitive.
pub fn find_command(name: &str) -> Option<&'static CommandMeta> {
    let lookup = name.trim().to_ascii_lowercase();
    COMMANDS.iter().find(|command| command.name == lookup)
}
