//! CLI subcommand implementations.

pub mod list;
pub mod replay;
pub mod track;
