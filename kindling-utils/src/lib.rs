/// Channel-kind classification for logged messages.
pub mod channel;
/// Embed colours and builders shared across commands.
pub mod embed;
/// Shared formatting helpers (timestamps, mentions, latency).
pub mod formatting;
/// Static bot identity shown by `info`, `version` and `github`.
pub mod info;
/// Pure parser helpers.
pub mod parse;
/// Permission levels, capabilities and the command gate.
pub mod permissions;
