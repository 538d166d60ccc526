//! Core domain logic for timed.
//!
//! This crate contains the fundamental types and logic for:
//! - Parsing: validating `yyyy-mm-dd` dates and `hh:mm` times
//! - Working days: the tracked entity and its partial-update rule
//! - Overtime: the running balance against a daily target

pub mod format;
pub mod overtime;
pub mod parse;
pub mod working_day;

pub use format::{format_duration, format_hours};
pub use overtime::{DEFAULT_DAILY_TARGET_HOURS, compute_overtime, compute_overtime_against};
pub use parse::{MAX_NOTE_LEN, ParseError, parse_date, parse_time, validate_note};
pub use working_day::{NewWorkingDay, WorkingDay, WorkingDayUpdate};
