use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use kindling_utils::embed::{GITHUB_COLOR, INFO_COLOR, PING_COLOR, VERSION_COLOR};
use kindling_utils::formatting::{bullet_list, format_latency};
use kindling_utils::info::{
    BOT_DESCRIPTION, BOT_NAME, BUGS_AND_FEATURES, FEATURES, GITHUB_DESCRIPTION, GITHUB_ICON_URL,
    GITHUB_LINK, VERSION, github_repository_name,
};
use kindling_utils::permissions::OWNER_ID;

pub fn unknown_query_message(query: &str, valid_categories: &[&str]) -> String {
    let valid = valid_categories
        .iter()
        .map(|category| display_category(category))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "No command or category named `{}`.\nValid categories: {}",
        query, valid
    )
}

pub fn no_commands_message(category: Option<&str>) -> String {
    match category {
        Some(cat) => format!("No commands found in category: {}", display_category(cat)),
        None => "No commands found at all. (This probably means something is broken)".to_owned(),
    }
}

pub fn page_out_of_range_message(requested_page: usize, total_pages: usize) -> String {
    format!(
        "Page {} does not exist. Available pages: 1-{}.",
        requested_page, total_pages
    )
}

pub fn grouped_help_description(commands: &[&CommandMeta], prefix: &str) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", display_category(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!("`{}{}`: {}\n", prefix, command.name, command.desc));
    }

    if out.is_empty() {
        out.push_str("No commands available.");
    }

    out.trim_end().to_owned()
}

pub fn command_help_description(command: &CommandMeta, prefix: &str) -> String {
    format!(
        "{}\n\n**Usage:** `{}{}`\n**Category:** {}",
        command.desc,
        prefix,
        command.usage,
        display_category(command.category)
    )
}

pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

pub fn ping_embed(latency: std::time::Duration) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new().title("Pong!").color(PING_COLOR);
    match format_latency(latency) {
        Some(latency) => embed.description(format!("Latency: {}", latency)),
        None => embed,
    }
}

pub fn version_embed() -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(format!("{} v{}", BOT_NAME, VERSION))
        .color(VERSION_COLOR)
}

pub fn github_embed(avatar_url: Option<String>) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new()
        .title(github_repository_name())
        .description(GITHUB_DESCRIPTION)
        .url(GITHUB_LINK)
        .color(GITHUB_COLOR)
        .author(serenity::CreateEmbedAuthor::new("GitHub").icon_url(GITHUB_ICON_URL));

    match avatar_url {
        Some(url) => embed.thumbnail(url),
        None => embed,
    }
}

/// Overview embed for `info` and for bare mentions of the bot.
pub fn build_info_embed(
    prefix: &str,
    bot_user_id: serenity::UserId,
    avatar_url: Option<String>,
) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new()
        .title(BOT_NAME)
        .description(BOT_DESCRIPTION)
        .color(INFO_COLOR)
        .field("Features", bullet_list(FEATURES.iter().copied()), false)
        .field("Author", format!("<@{}>", OWNER_ID), true)
        .field("Version", VERSION, true)
        .field("GitHub", GITHUB_LINK, false)
        .field(
            "Prefix",
            format!("`{}` or <@{}>", prefix, bot_user_id),
            true,
        )
        .field("Help Command", format!("`{}help`", prefix), true)
        .field("Bugs & Features", BUGS_AND_FEATURES, false);

    match avatar_url {
        Some(url) => embed.thumbnail(url),
        None => embed,
    }
}

#[cfg(test)]
mod tests {
    use super::{command_help_description, display_category, grouped_help_description};
    use crate::CommandMeta;

    const PING: CommandMeta = CommandMeta {
        name: "ping",
        desc: "Display bot latency.",
        category: "utility",
        usage: "ping",
    };
    const PREFIX: CommandMeta = CommandMeta {
        name: "prefix",
        desc: "Change the bot prefix.",
        category: "administration",
        usage: "prefix <new prefix>",
    };

    #[test]
    fn groups_commands_under_category_headers() {
        let text = grouped_help_description(&[&PREFIX, &PING], ".");
        assert_eq!(
            text,
            "**Administration**\n`.prefix`: Change the bot prefix.\n\n**Utility**\n`.ping`: Display bot latency."
        );
    }

    #[test]
    fn empty_help_says_so() {
        assert_eq!(grouped_help_description(&[], "."), "No commands available.");
    }

    #[test]
    fn single_command_help_shows_prefixed_usage() {
        let text = command_help_description(&PREFIX, "!");
        assert!(text.contains("`!prefix <new prefix>`"));
        assert!(text.contains("Administration"));
    }

    #[test]
    fn categories_are_capitalized() {
        assert_eq!(display_category("utility"), "Utility");
        assert_eq!(display_category(""), "");
    }
}
