//! Human-readable rendering of durations and hour balances.

use chrono::Duration;

/// Formats a duration as `Xh Ym`, or `Ym` below one hour.
///
/// Negative durations keep their sign (`-1h 30m`).
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes();
    let sign = if total_minutes < 0 { "-" } else { "" };
    let total_minutes = total_minutes.unsigned_abs();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{sign}{hours}h {minutes}m")
    } else {
        format!("{sign}{minutes}m")
    }
}

/// Formats a signed hour balance with two decimals and an explicit sign.
pub fn format_hours(hours: f64) -> String {
    // Avoid printing "-0.00h" for tiny negative rounding errors.
    let hours = if hours.abs() < 0.005 { 0.0 } else { hours };
    format!("{hours:+.2}h")
}
