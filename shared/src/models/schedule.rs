//! Schedule Model (recurring shift templates)

use chrono::{NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

/// Schedule: a named recurrence of `number_of_weeks` weeks owning templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub number_of_weeks: i32,
    pub shifts: Vec<ScheduledShift>,
}

/// Recurring shift template: day-of-week plus a time-of-day range
///
/// `end` earlier than `start` means the template runs past midnight into
/// the following day. Equal times are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledShift {
    pub id: i64,
    pub schedule_id: i64,
    /// 0 = Monday … 6 = Sunday
    pub day: u8,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub employee_ids: Vec<i64>,
}

impl ScheduledShift {
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    pub fn duration(&self) -> TimeDelta {
        let span = self.end - self.start;
        if self.crosses_midnight() {
            span + TimeDelta::days(1)
        } else {
            span
        }
    }
}

/// Map a 0-based day index (Monday first) to a weekday
pub fn weekday_from_index(day: u8) -> Option<Weekday> {
    match day {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Create schedule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCreate {
    pub name: String,
    pub number_of_weeks: i32,
}

/// Create scheduled shift payload; times are `HH:MM` or `HH:MM:SS`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledShiftCreate {
    pub day: u8,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub employee_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(start: (u32, u32), end: (u32, u32)) -> ScheduledShift {
        ScheduledShift {
            id: 1,
            schedule_id: 1,
            day: 4,
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            employee_ids: vec![],
        }
    }

    #[test]
    fn test_same_day_template() {
        let t = template((9, 0), (17, 0));
        assert!(!t.crosses_midnight());
        assert_eq!(t.duration(), TimeDelta::hours(8));
    }

    #[test]
    fn test_overnight_template_runs_into_next_day() {
        let t = template((22, 0), (6, 0));
        assert!(t.crosses_midnight());
        assert_eq!(t.duration(), TimeDelta::hours(8));
    }

    #[test]
    fn test_midnight_end_is_next_day() {
        let t = template((18, 0), (0, 0));
        assert!(t.crosses_midnight());
        assert_eq!(t.duration(), TimeDelta::hours(6));
    }

    #[test]
    fn test_weekday_index_bounds() {
        assert_eq!(weekday_from_index(0), Some(Weekday::Mon));
        assert_eq!(weekday_from_index(6), Some(Weekday::Sun));
        assert_eq!(weekday_from_index(7), None);
    }
}
