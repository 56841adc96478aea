pub mod admininfo;
pub mod changelog;
pub mod changelogchannel;
pub mod prefix;
pub mod roles;
