pub mod permissions;
pub mod setlevel;
