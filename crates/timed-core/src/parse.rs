//! Parsing of user-supplied date and time arguments.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use thiserror::Error;

/// Longest note a working day may carry.
pub const MAX_NOTE_LEN: usize = 100;

/// Strict `yyyy-mm-dd` shape; calendar validity is checked by chrono afterwards.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex is valid"));

/// Strict 24-hour `hh:mm` shape.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("time regex is valid"));

/// Errors for malformed user input.
///
/// Every variant carries enough of the offending input to tell the user what to fix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The date was not a real calendar date in `yyyy-mm-dd` form.
    #[error("invalid date format: {0} (expected yyyy-mm-dd, e.g. 2019-03-28)")]
    InvalidDateFormat(String),

    /// The time was not a valid 24-hour `hh:mm` value.
    #[error("invalid time format: {0} (expected hh:mm, e.g. 08:00)")]
    InvalidTimeFormat(String),

    /// The note exceeds [`MAX_NOTE_LEN`] characters.
    #[error("note is {len} characters long, at most {MAX_NOTE_LEN} are allowed")]
    NoteTooLong { len: usize },
}

/// Parses an optional `yyyy-mm-dd` date.
///
/// Returns `Ok(None)` when no text was given so the caller can substitute today.
pub fn parse_date(text: Option<&str>) -> Result<Option<NaiveDate>, ParseError> {
    let Some(text) = text else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if !DATE_RE.is_match(trimmed) {
        return Err(ParseError::InvalidDateFormat(text.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ParseError::InvalidDateFormat(text.to_string()))
}

/// Parses an optional `hh:mm` time of day.
pub fn parse_time(text: Option<&str>) -> Result<Option<NaiveTime>, ParseError> {
    let Some(text) = text else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if !TIME_RE.is_match(trimmed) {
        return Err(ParseError::InvalidTimeFormat(text.to_string()));
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map(Some)
        .map_err(|_| ParseError::InvalidTimeFormat(text.to_string()))
}

/// Checks that a note fits into the store.
pub fn validate_note(note: &str) -> Result<(), ParseError> {
    let len = note.chars().count();
    if len > MAX_NOTE_LEN {
        return Err(ParseError::NoteTooLong { len });
    }
    Ok(())
}
