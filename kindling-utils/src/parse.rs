/// Longest prefix accepted by the `prefix` command.
pub const MAX_PREFIX_LEN: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrefixError {
    #[error("Length of prefix must be between 1 and 16.")]
    InvalidLength,
    #[error("Prefix contains invalid characters.")]
    InvalidCharacters,
}

/// Accept 1 to 16 ASCII letters, digits or punctuation characters.
pub fn validate_prefix(raw: &str) -> Result<(), PrefixError> {
    let len = raw.chars().count();
    if len == 0 || len > MAX_PREFIX_LEN {
        return Err(PrefixError::InvalidLength);
    }

    if !raw
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch.is_ascii_punctuation())
    {
        return Err(PrefixError::InvalidCharacters);
    }

    Ok(())
}

/// Parse a channel mention (`<#id>`) or a raw channel ID.
pub fn parse_channel_id(raw: &str) -> Option<u64> {
    parse_mention(raw, "<#")
}

/// Parse a role mention (`<@&id>`) or a raw role ID.
pub fn parse_role_id(raw: &str) -> Option<u64> {
    parse_mention(raw, "<@&")
}

fn parse_mention(raw: &str, open: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<u64>() {
        return Some(id).filter(|id| *id > 0);
    }

    raw.strip_prefix(open)?
        .strip_suffix('>')?
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
}
