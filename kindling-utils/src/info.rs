pub const BOT_NAME: &str = "Kindling";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GITHUB_LINK: &str = env!("CARGO_PKG_REPOSITORY");
pub const GITHUB_ICON_URL: &str = "https://github.com/fluidicon.png";

pub const BOT_DESCRIPTION: &str =
    "Template for Discord bots with permission levels, settings and a message log.";
pub const GITHUB_DESCRIPTION: &str = "Source code, issues and releases of this bot.";
pub const BUGS_AND_FEATURES: &str =
    "Found a bug or missing a feature? Open an issue on GitHub.";

pub const FEATURES: &[&str] = &[
    "Permission levels from configurable roles",
    "Changeable command prefix",
    "Message log",
    "Status embed for the bot owner",
];

/// `owner/repo` part of [`GITHUB_LINK`].
pub fn github_repository_name() -> &'static str {
    GITHUB_LINK
        .trim_end_matches('/')
        .trim_start_matches("https://github.com/")
}

#[cfg(test)]
mod tests {
    use super::github_repository_name;

    #[test]
    fn repository_name_has_no_host() {
        let name = github_repository_name();
        assert!(!name.contains("https://"));
        assert!(!name.ends_with('/'));
    }
}
