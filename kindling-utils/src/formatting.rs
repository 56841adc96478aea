use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Discord timestamp markup showing full date and time.
pub fn format_timestamp(unix_secs: u64) -> String {
    format!("<t:{}:F>", unix_secs)
}

/// `None` when the shard has not measured a heartbeat yet.
pub fn format_latency(latency: Duration) -> Option<String> {
    if latency.is_zero() {
        return None;
    }

    Some(format!("{:.2} ms", latency.as_secs_f64() * 1000.0))
}

pub fn role_mention(role_id: Option<u64>) -> String {
    match role_id {
        Some(id) => format!("<@&{}>", id),
        None => "Not configured".to_owned(),
    }
}

pub fn channel_mention(channel_id: Option<u64>) -> String {
    match channel_id {
        Some(id) => format!("<#{}>", id),
        None => "Not configured".to_owned(),
    }
}

/// One `:small_orange_diamond:` line per entry.
pub fn bullet_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|item| format!(":small_orange_diamond: {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shorten `text` to `max_chars` characters, marking the cut with an ellipsis.
pub fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{bullet_list, channel_mention, format_latency, format_timestamp, role_mention, shorten};

    #[test]
    fn timestamps_use_discord_markup() {
        assert_eq!(format_timestamp(1_700_000_000), "<t:1700000000:F>");
    }

    #[test]
    fn unknown_latency_is_not_reported() {
        assert_eq!(format_latency(Duration::ZERO), None);
        assert_eq!(format_latency(Duration::from_millis(42)), Some("42.00 ms".to_owned()));
    }

    #[test]
    fn mentions_fall_back_when_unset() {
        assert_eq!(role_mention(Some(5)), "<@&5>");
        assert_eq!(role_mention(None), "Not configured");
        assert_eq!(channel_mention(Some(7)), "<#7>");
        assert_eq!(channel_mention(None), "Not configured");
    }

    #[test]
    fn bullet_lists_one_line_per_item() {
        assert_eq!(
            bullet_list(["a", "b"]),
            ":small_orange_diamond: a\n:small_orange_diamond: b"
        );
        assert_eq!(bullet_list(Vec::<&str>::new()), "");
    }

    #[test]
    fn shorten_marks_cut_text() {
        assert_eq!(shorten("hello", 10), "hello");
        assert_eq!(shorten("hello world", 6), "hello…");
    }
}
