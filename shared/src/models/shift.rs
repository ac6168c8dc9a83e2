//! Shift Model (dated shift instances and check-ins)

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::Employee;

/// Concrete, dated shift with absolute UTC bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: i64,
    pub organization_id: i64,
    /// Schedule this shift was generated from, if any
    pub schedule_id: Option<i64>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Roster (employee ids, ascending)
    pub employee_ids: Vec<i64>,
    /// Check-ins in creation order
    pub check_ins: Vec<CheckIn>,
}

impl Shift {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn checked_in_employee_ids(&self) -> Vec<i64> {
        self.check_ins.iter().map(|c| c.employee_id).collect()
    }
}

/// Record that an employee arrived for a shift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: i64,
    pub shift_id: i64,
    pub employee_id: i64,
    /// Whole seconds, UTC
    pub time: DateTime<Utc>,
}

/// Ongoing shift view for devices (roster resolved to employees)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OngoingShift {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub employees: Vec<Employee>,
    pub checked_in_employee_ids: Vec<i64>,
}

/// Create shift payload; timestamps are ISO-8601 with offset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCreate {
    #[serde(default)]
    pub employee_ids: Vec<i64>,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub schedule_id: Option<i64>,
}

/// Employee-created shift, capped at the server's maximum duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitedShiftCreate {
    #[serde(default)]
    pub employee_ids: Vec<i64>,
    pub start: String,
    pub end: String,
}

/// Create a shift starting at the next quarter hour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftOutsideScheduleCreate {
    #[serde(default)]
    pub employee_ids: Vec<i64>,
    pub open_minutes: u32,
}

/// Update shift payload
///
/// The roster is replaced by `employee_ids`; check-ins whose ids are not in
/// `check_in_ids` are removed from the shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftUpdate {
    #[serde(default)]
    pub employee_ids: Vec<i64>,
    #[serde(default)]
    pub check_in_ids: Vec<i64>,
    pub start: String,
    pub end: String,
}

/// Check-in payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub employee_id: i64,
}

/// Query window for shift listings; `date` (YYYY-MM-DD) selects one UTC day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub date: Option<String>,
}
