/// Maximum number of characters stored per logged message.
pub const LOG_CONTENT_MAX_CHARS: usize = 512;

/// Kind of channel a logged message was sent in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "channel_type", rename_all = "lowercase")]
pub enum ChannelType {
    Text,
    Dm,
    Group,
    Voice,
}

impl ChannelType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Dm => "dm",
            Self::Group => "group",
            Self::Voice => "voice",
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: u64,
    pub user_id: u64,
    pub content: String,
    pub channel_id: Option<u64>,
    pub channel_type: ChannelType,
}

/// Cut `content` down to at most [`LOG_CONTENT_MAX_CHARS`] characters.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate_content(content: &str) -> &str {
    match content.char_indices().nth(LOG_CONTENT_MAX_CHARS) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelType, LOG_CONTENT_MAX_CHARS, truncate_content};

    #[test]
    fn short_content_is_kept_verbatim() {
        assert_eq!(truncate_content("hello there"), "hello there");
        assert_eq!(truncate_content(""), "");
    }

    #[test]
    fn long_content_is_cut_at_the_column_limit() {
        let long = "a".repeat(LOG_CONTENT_MAX_CHARS + 40);
        assert_eq!(truncate_content(&long).len(), LOG_CONTENT_MAX_CHARS);

        let exact = "b".repeat(LOG_CONTENT_MAX_CHARS);
        assert_eq!(truncate_content(&exact), exact);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "ü".repeat(LOG_CONTENT_MAX_CHARS + 1);
        let cut = truncate_content(&long);
        assert_eq!(cut.chars().count(), LOG_CONTENT_MAX_CHARS);
        assert_eq!(cut.len(), LOG_CONTENT_MAX_CHARS * 2);
    }

    #[test]
    fn channel_type_names_match_the_database_enum() {
        assert_eq!(ChannelType::Text.as_str(), "text");
        assert_eq!(ChannelType::Dm.as_str(), "dm");
        assert_eq!(ChannelType::Group.as_str(), "group");
        assert_eq!(ChannelType::Voice.as_str(), "voice");
    }
}
