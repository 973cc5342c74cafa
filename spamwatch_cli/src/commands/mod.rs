//! CLI subcommand implementations.

pub mod bans;
pub mod info;
pub mod tokens;
