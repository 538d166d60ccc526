//! List command for showing working days in a date range.

use std::io::Write;

use anyhow::Result;
use chrono::{Days, NaiveDate};
use clap::Args;

use timed_core::{
    WorkingDay, compute_overtime_against, format_duration, format_hours, parse_date,
};
use timed_db::Database;

/// How far back the listing reaches when no start date is given.
const DEFAULT_LOOKBACK_DAYS: u64 = 30;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// First date to show, as yyyy-mm-dd. Defaults to 30 days ago.
    #[arg(short, long)]
    pub from: Option<String>,

    /// Last date to show, as yyyy-mm-dd. Defaults to today.
    #[arg(short, long)]
    pub to: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    args: &ListArgs,
    today: NaiveDate,
    daily_target_hours: f64,
) -> Result<()> {
    let from = parse_date(args.from.as_deref())?
        .unwrap_or_else(|| today - Days::new(DEFAULT_LOOKBACK_DAYS));
    let to = parse_date(args.to.as_deref())?.unwrap_or(today);
    tracing::debug!(%from, %to, "listing working days");

    let days = db.list_range(from, to)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &days)?;
        writeln!(writer)?;
        return Ok(());
    }

    if days.is_empty() {
        writeln!(writer, "No entries.")?;
        return Ok(());
    }

    render_table(writer, &days)?;
    writeln!(
        writer,
        "Overtime: {}",
        format_hours(compute_overtime_against(&days, daily_target_hours))
    )?;
    Ok(())
}

fn render_table<W: Write>(writer: &mut W, days: &[WorkingDay]) -> Result<()> {
    writeln!(writer, "Date        Start  End    Break   Worked  Note")?;
    for day in days {
        let line = format!(
            "{}  {}  {}  {:>5}  {:>7}  {}",
            day.day,
            day.start.format("%H:%M"),
            day.end.format("%H:%M"),
            format_duration(day.break_duration()),
            format_duration(day.worked()),
            day.note,
        );
        writeln!(writer, "{}", line.trim_end())?;
    }
    Ok(())
}
