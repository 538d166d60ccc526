use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use timed_cli::commands::{list, replay, track};
use timed_cli::{Cli, Commands, Config};
use timed_db::Database;

/// Opens the database, creating it first when `init` is set.
fn open_database(path: &Path, init: bool) -> Result<Database> {
    if init {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("failed to create database directory")?;
        }
        tracing::info!(path = %path.display(), "initializing database");
    } else if !path.exists() {
        bail!(
            "no database found at {}; run `timed --init` to create it",
            path.display()
        );
    }

    Database::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut db = open_database(&config.database_path, cli.init)?;
    let now = Local::now().naive_local();
    let mut stdout = io::stdout().lock();

    match &cli.command {
        None => {
            track::run(
                &mut stdout,
                &mut db,
                &cli.track,
                now,
                config.daily_target_hours,
            )?;
        }
        Some(Commands::List(args)) => {
            list::run(
                &mut stdout,
                &db,
                args,
                now.date(),
                config.daily_target_hours,
            )?;
        }
        Some(Commands::Replay(args)) => {
            let path = args.file.as_deref().unwrap_or(config.replay_path.as_path());
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            replay::run(&mut stdout, &mut db, file, now, config.daily_target_hours)?;
        }
    }

    Ok(())
}
