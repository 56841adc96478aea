pub mod embeds;
pub mod github;
pub mod help;
pub mod info;
pub mod ping;
pub mod version;
