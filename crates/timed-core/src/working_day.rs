//! Working days - one tracked entry per calendar date.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A persisted record of one day of work.
///
/// At most one working day exists per [`day`](Self::day); the store enforces this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingDay {
    /// Surrogate key assigned by the store.
    pub id: i64,

    /// The calendar date this entry belongs to.
    pub day: NaiveDate,

    /// Time work started.
    pub start: NaiveTime,

    /// Time work ended. Expected, but not required, to be after `start`.
    pub end: NaiveTime,

    /// Total break duration in minutes.
    #[serde(default)]
    pub break_in_minutes: u32,

    /// Free-text annotation.
    #[serde(default)]
    pub note: String,
}

/// A working day that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkingDay {
    pub day: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub break_in_minutes: u32,
    pub note: String,
}

/// Field values supplied by the user for one invocation.
///
/// `None` means "not supplied". An explicit `Some(0)` break is a real value and
/// overrides whatever break was stored before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingDayUpdate {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub break_in_minutes: Option<u32>,
    pub note: Option<String>,
}

impl WorkingDayUpdate {
    /// The note, unless it is missing or empty.
    fn supplied_note(&self) -> Option<&str> {
        self.note.as_deref().filter(|note| !note.is_empty())
    }

    /// True when no field would change anything.
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.break_in_minutes.is_none()
            && self.supplied_note().is_none()
    }
}

impl NewWorkingDay {
    /// Builds a new entry from the supplied fields.
    ///
    /// Missing times default to `now`, the break to zero and the note to empty.
    pub fn with_defaults(day: NaiveDate, now: NaiveTime, changes: &WorkingDayUpdate) -> Self {
        Self {
            day,
            start: changes.start.unwrap_or(now),
            end: changes.end.unwrap_or(now),
            break_in_minutes: changes.break_in_minutes.unwrap_or(0),
            note: changes.supplied_note().unwrap_or_default().to_string(),
        }
    }

    /// Attaches the id the store assigned.
    pub fn into_stored(self, id: i64) -> WorkingDay {
        WorkingDay {
            id,
            day: self.day,
            start: self.start,
            end: self.end,
            break_in_minutes: self.break_in_minutes,
            note: self.note,
        }
    }
}

impl WorkingDay {
    /// Merges supplied values into this entry, keeping every field that was not supplied.
    ///
    /// Returns `false` if nothing was supplied.
    pub fn update(&mut self, changes: &WorkingDayUpdate) -> bool {
        if let Some(start) = changes.start {
            self.start = start;
        }
        if let Some(end) = changes.end {
            self.end = end;
        }
        if let Some(break_in_minutes) = changes.break_in_minutes {
            self.break_in_minutes = break_in_minutes;
        }
        if let Some(note) = changes.supplied_note() {
            self.note = note.to_string();
        }
        !changes.is_empty()
    }

    /// Time between start and end. Negative if the day ends before it starts.
    pub fn present(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// Break as a duration.
    pub fn break_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.break_in_minutes))
    }

    /// Time actually worked: presence minus break.
    pub fn worked(&self) -> Duration {
        self.present() - self.break_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn stored() -> WorkingDay {
        WorkingDay {
            id: 1,
            day: NaiveDate::from_ymd_opt(2020, 6, 22).unwrap(),
            start: time(6, 0),
            end: time(17, 0),
            break_in_minutes: 60,
            note: "initial".to_string(),
        }
    }

    #[test]
    fn update_with_only_note_keeps_other_fields() {
        let mut day = stored();
        let changed = day.update(&WorkingDayUpdate {
            note: Some("changed".to_string()),
            ..WorkingDayUpdate::default()
        });

        assert!(changed);
        assert_eq!(day.note, "changed");
        assert_eq!(day.start, time(6, 0));
        assert_eq!(day.end, time(17, 0));
        assert_eq!(day.break_in_minutes, 60);
    }

    #[test]
    fn update_replaces_supplied_times() {
        let mut day = stored();
        day.update(&WorkingDayUpdate {
            start: Some(time(7, 0)),
            end: Some(time(18, 0)),
            ..WorkingDayUpdate::default()
        });

        assert_eq!(day.start, time(7, 0));
        assert_eq!(day.end, time(18, 0));
        assert_eq!(day.note, "initial");
    }

    #[test]
    fn explicit_zero_break_overrides_previous_break() {
        let mut day = stored();
        day.update(&WorkingDayUpdate {
            break_in_minutes: Some(0),
            ..WorkingDayUpdate::default()
        });
        assert_eq!(day.break_in_minutes, 0);
    }

    #[test]
    fn empty_note_is_not_an_update() {
        let mut day = stored();
        let changed = day.update(&WorkingDayUpdate {
            note: Some(String::new()),
            ..WorkingDayUpdate::default()
        });
        assert!(!changed);
        assert_eq!(day, stored());
    }

    #[test]
    fn new_working_day_fills_defaults() {
        let day = NewWorkingDay::with_defaults(
            NaiveDate::from_ymd_opt(2020, 6, 27).unwrap(),
            time(9, 15),
            &WorkingDayUpdate {
                start: Some(time(6, 20)),
                ..WorkingDayUpdate::default()
            },
        );

        assert_eq!(day.start, time(6, 20));
        assert_eq!(day.end, time(9, 15));
        assert_eq!(day.break_in_minutes, 0);
        assert_eq!(day.note, "");
    }

    #[test]
    fn worked_subtracts_break() {
        assert_eq!(stored().worked(), Duration::hours(10));
    }

    #[test]
    fn worked_is_negative_when_end_precedes_start() {
        let mut day = stored();
        day.start = time(17, 0);
        day.end = time(6, 0);
        day.break_in_minutes = 0;
        assert_eq!(day.worked(), Duration::hours(-11));
    }
}
