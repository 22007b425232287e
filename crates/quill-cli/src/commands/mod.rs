//! Command handlers, one per subcommand.

pub mod entries;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod security;
