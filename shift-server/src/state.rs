//! Application state

use shared::AppError;

use crate::auth::AccessGate;
use crate::config::Config;
use crate::db::DbService;
use crate::services::{CheckInService, IdentityService, ScheduleService, ShiftService};

/// Shared application state. All mutable state lives in the database.
#[derive(Clone)]
pub struct AppState {
    pub db: DbService,
    pub gate: AccessGate<DbService>,
    pub identity: IdentityService,
    pub schedules: ScheduleService,
    pub shifts: ShiftService,
    pub check_ins: CheckInService,
    /// Cap for employee-created shifts
    pub max_shift_minutes: i64,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::from_db(db, config.max_shift_minutes))
    }

    pub fn from_db(db: DbService, max_shift_minutes: i64) -> Self {
        Self {
            gate: AccessGate::new(db.clone()),
            identity: IdentityService::new(db.clone()),
            schedules: ScheduleService::new(db.clone()),
            shifts: ShiftService::new(db.clone()),
            check_ins: CheckInService::new(db.clone()),
            max_shift_minutes,
            db,
        }
    }
}
