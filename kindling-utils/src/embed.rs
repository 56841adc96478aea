use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x00_96_88;
pub const ERROR_COLOR: u32 = 0xF4_43_36;

pub const GITHUB_COLOR: u32 = 0x00_69_5C;
pub const INFO_COLOR: u32 = 0x3F_51_B5;
pub const PING_COLOR: u32 = 0x00_C8_53;
pub const PREFIX_COLOR: u32 = 0x3F_51_B5;
pub const PERMISSIONS_COLOR: u32 = 0x3F_51_B5;
pub const USERLOG_COLOR: u32 = 0x00_E6_76;
pub const VERSION_COLOR: u32 = 0x3F_51_B5;

/// Longest description Discord accepts in one embed.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// The one rejection shown for every failed permission check.
pub fn permission_denied_embed() -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("Permission Denied")
        .description("You are not permitted to use this command.")
        .color(ERROR_COLOR)
}

pub fn error_embed(description: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("Error")
        .description(description)
        .color(ERROR_COLOR)
}

/// Build a standard paginated embed with consistent styling.
pub fn build_paginated_embed(
    title: &str,
    description: impl Into<String>,
    page: usize,
    total_pages: usize,
) -> serenity::CreateEmbed {
    let page = page.max(1);
    let total_pages = total_pages.max(1);

    let builder = serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    if total_pages > 1 {
        builder.footer(serenity::CreateEmbedFooter::new(format!(
            "Page {}/{}",
            page, total_pages
        )))
    } else {
        builder
    }
}

/// Split a long description into chunks that each fit into one embed.
///
/// Lines are kept whole unless a single line is longer than `limit`.
pub fn split_description(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let needed = if current.is_empty() {
            line.chars().count()
        } else {
            current.chars().count() + 1 + line.chars().count()
        };

        if needed <= limit {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        let chars: Vec<char> = line.chars().collect();
        let mut pieces = chars.chunks(limit).map(|piece| piece.iter().collect::<String>());
        let last = pieces.next_back();
        chunks.extend(pieces);
        if let Some(last) = last {
            current = last;
        }
    }

    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }

    chunks
}
