//! Replay command for rebuilding the store from an archive of tracking commands.
//!
//! Each CSV record holds the positional values `date,start,end,break,note,delete`.
//! Empty or missing fields count as not supplied.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use clap::Args;
use csv::{ReaderBuilder, StringRecord};

use timed_db::Database;

use super::track::{self, TrackArgs};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// CSV archive to replay. Defaults to `replay_path` from the config (~/.timed.csv).
    pub file: Option<PathBuf>,
}

/// Replays every record of `reader` through the track command.
///
/// Each record is committed on its own. The first invalid record stops the replay;
/// records before it stay applied.
pub fn run<W: Write, R: Read>(
    writer: &mut W,
    db: &mut Database,
    reader: R,
    now: NaiveDateTime,
    daily_target_hours: f64,
) -> Result<usize> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut replayed = 0;
    for record in csv.records() {
        let record = record.context("failed to read replay archive")?;
        let line = record.position().map_or(0, csv::Position::line);
        let args = parse_record(&record).with_context(|| format!("invalid command on line {line}"))?;
        tracing::debug!(line, ?args, "replaying command");
        track::run(writer, db, &args, now, daily_target_hours)
            .with_context(|| format!("failed to replay line {line}"))?;
        replayed += 1;
    }

    writeln!(writer, "Replayed {replayed} command(s)")?;
    Ok(replayed)
}

fn parse_record(record: &StringRecord) -> Result<TrackArgs> {
    if record.len() > 6 {
        bail!("expected at most 6 fields, got {}", record.len());
    }
    let field = |idx: usize| record.get(idx).filter(|value| !value.is_empty());

    let break_minutes = field(3)
        .map(|value| {
            value
                .parse::<u32>()
                .with_context(|| format!("invalid break minutes: {value}"))
        })
        .transpose()?;
    let delete = field(5).map(parse_flag).transpose()?.unwrap_or(false);

    Ok(TrackArgs {
        date: field(0).map(str::to_string),
        start: field(1).map(str::to_string),
        end: field(2).map(str::to_string),
        break_minutes,
        note: field(4).map(str::to_string),
        delete,
    })
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => bail!("invalid delete flag: {value}"),
    }
}
