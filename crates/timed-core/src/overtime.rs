//! Running overtime balance across all recorded days.

use crate::working_day::WorkingDay;

/// Hours a regular working day is expected to last.
pub const DEFAULT_DAILY_TARGET_HOURS: f64 = 8.0;

/// Computes the overtime balance in hours against the default eight-hour day.
///
/// Positive means ahead, negative means behind.
pub fn compute_overtime(entries: &[WorkingDay]) -> f64 {
    compute_overtime_against(entries, DEFAULT_DAILY_TARGET_HOURS)
}

/// Computes the overtime balance in hours against `daily_target_hours` per recorded day.
///
/// Every entry counts, including days that end before they start; those
/// contribute a negative presence.
#[allow(clippy::cast_precision_loss)]
pub fn compute_overtime_against(entries: &[WorkingDay], daily_target_hours: f64) -> f64 {
    let present_seconds: i64 = entries
        .iter()
        .map(|entry| entry.present().num_seconds())
        .sum();
    let break_minutes: u64 = entries
        .iter()
        .map(|entry| u64::from(entry.break_in_minutes))
        .sum();

    let present_hours = present_seconds as f64 / 3600.0;
    let break_hours = break_minutes as f64 / 60.0;
    let target_hours = entries.len() as f64 * daily_target_hours;

    present_hours - target_hours - break_hours
}
