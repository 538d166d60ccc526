//! timed CLI library.
//!
//! This crate provides the CLI interface and the command processor for timed.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
