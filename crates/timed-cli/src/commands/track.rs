//! Track command: add, update or delete the entry for one day and report the balance.

use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::Args;

use timed_core::{
    NewWorkingDay, WorkingDayUpdate, compute_overtime_against, format_duration, format_hours,
    parse_date, parse_time, validate_note,
};
use timed_db::Database;

#[derive(Debug, Clone, Default, Args)]
pub struct TrackArgs {
    /// Date of the entry, as yyyy-mm-dd (e.g. 2019-03-28). Defaults to today.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start time, as hh:mm (e.g. 08:00). Defaults to now for new entries.
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time, as hh:mm (e.g. 17:00). Defaults to now for new entries.
    #[arg(short, long)]
    pub end: Option<String>,

    /// Break duration in minutes. Defaults to 0 for new entries.
    #[arg(short = 'b', long = "break", value_name = "MINUTES")]
    pub break_minutes: Option<u32>,

    /// Note attached to the entry (at most 100 characters).
    #[arg(short, long)]
    pub note: Option<String>,

    /// Delete the entry for --date instead of saving it.
    #[arg(long)]
    pub delete: bool,
}

/// What an invocation did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Added(NaiveDate),
    Updated(NaiveDate),
    Deleted(NaiveDate),
    Nothing,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(day) => write!(f, "Added entry for {day}"),
            Self::Updated(day) => write!(f, "Updated entry for {day}"),
            Self::Deleted(day) => write!(f, "Deleted entry for {day}"),
            Self::Nothing => write!(f, "Nothing happened"),
        }
    }
}

/// Result of one tracking invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub action: Action,
    /// Worked time of the saved entry. `None` on the delete path.
    pub worked: Option<Duration>,
    /// Overtime balance in hours over all entries after this invocation.
    pub overtime_hours: f64,
}

impl Outcome {
    /// Writes the report lines: action, worked time (save path only), overtime.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.action)?;
        if let Some(worked) = self.worked {
            writeln!(writer, "Worked: {}", format_duration(worked))?;
        }
        writeln!(writer, "Overtime: {}", format_hours(self.overtime_hours))
    }
}

/// Runs the track command and prints its report.
pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    args: &TrackArgs,
    now: NaiveDateTime,
    daily_target_hours: f64,
) -> Result<Outcome> {
    let outcome = process(db, args, now, daily_target_hours)?;
    outcome.write_to(writer)?;
    Ok(outcome)
}

/// Applies one tracking command to the store.
///
/// All input is validated before the store is touched. Reads and writes share one
/// transaction that is only committed once the report has been computed.
pub fn process(
    db: &mut Database,
    args: &TrackArgs,
    now: NaiveDateTime,
    daily_target_hours: f64,
) -> Result<Outcome> {
    let explicit_date = parse_date(args.date.as_deref())?;
    let day = explicit_date.unwrap_or_else(|| now.date());
    let changes = WorkingDayUpdate {
        start: parse_time(args.start.as_deref())?,
        end: parse_time(args.end.as_deref())?,
        break_in_minutes: args.break_minutes,
        note: args.note.clone(),
    };
    if let Some(note) = &changes.note {
        validate_note(note)?;
    }

    let tx = db.transaction().context("failed to start transaction")?;
    let existing = tx.find_by_day(day)?;

    let (action, worked) = if args.delete {
        match (explicit_date, existing) {
            (Some(_), Some(entry)) => {
                tx.delete(entry.id)?;
                tracing::info!(%day, id = entry.id, "deleted working day");
                (Action::Deleted(day), None)
            }
            (None, _) => {
                tracing::debug!("delete requested without an explicit date");
                (Action::Nothing, None)
            }
            (Some(_), None) => {
                tracing::debug!(%day, "no working day to delete");
                (Action::Nothing, None)
            }
        }
    } else if let Some(mut entry) = existing {
        let action = if entry.update(&changes) {
            tx.update(&entry)?;
            tracing::info!(%day, id = entry.id, "updated working day");
            Action::Updated(day)
        } else {
            tracing::debug!(%day, "no fields supplied for existing working day");
            Action::Nothing
        };
        warn_if_reversed(day, entry.start, entry.end);
        (action, Some(entry.worked()))
    } else {
        let entry = tx.insert(NewWorkingDay::with_defaults(day, now.time(), &changes))?;
        tracing::info!(%day, id = entry.id, "added working day");
        warn_if_reversed(day, entry.start, entry.end);
        (Action::Added(day), Some(entry.worked()))
    };

    let overtime_hours = compute_overtime_against(&tx.list_all()?, daily_target_hours);
    tx.commit().context("failed to commit changes")?;

    Ok(Outcome {
        action,
        worked,
        overtime_hours,
    })
}

fn warn_if_reversed(day: NaiveDate, start: chrono::NaiveTime, end: chrono::NaiveTime) {
    if end < start {
        tracing::warn!(%day, %start, %end, "working day ends before it starts");
    }
}
