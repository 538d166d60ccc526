//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::list::ListArgs;
use crate::commands::replay::ReplayArgs;
use crate::commands::track::TrackArgs;

/// Manages working times.
///
/// Without a subcommand, records or updates the entry for one day (today by
/// default) and reports the worked hours plus the running overtime balance.
#[derive(Debug, Parser)]
#[command(name = "timed", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Create the database and its schema if they do not exist yet.
    #[arg(long, global = true)]
    pub init: bool,

    #[command(flatten)]
    pub track: TrackArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List working days in a date range.
    List(ListArgs),

    /// Replay an archive of tracking commands from a CSV file.
    Replay(ReplayArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tracking_flags() {
        let cli = Cli::try_parse_from([
            "timed", "-d", "2020-06-27", "-s", "06:20", "-e", "17:00", "-b", "30", "-n", "x",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.track.date.as_deref(), Some("2020-06-27"));
        assert_eq!(cli.track.start.as_deref(), Some("06:20"));
        assert_eq!(cli.track.end.as_deref(), Some("17:00"));
        assert_eq!(cli.track.break_minutes, Some(30));
        assert_eq!(cli.track.note.as_deref(), Some("x"));
        assert!(!cli.track.delete);
    }

    #[test]
    fn parses_long_break_and_delete() {
        let cli =
            Cli::try_parse_from(["timed", "--init", "--date", "2020-06-27", "--break", "0", "--delete"])
                .unwrap();
        assert!(cli.init);
        assert_eq!(cli.track.break_minutes, Some(0));
        assert!(cli.track.delete);
    }

    #[test]
    fn rejects_non_numeric_break() {
        assert!(Cli::try_parse_from(["timed", "--break", "half"]).is_err());
    }

    #[test]
    fn parses_list_subcommand() {
        let cli = Cli::try_parse_from(["timed", "list", "--from", "2020-06-01", "--json"]).unwrap();
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.from.as_deref(), Some("2020-06-01"));
        assert!(args.to.is_none());
        assert!(args.json);
    }
}
