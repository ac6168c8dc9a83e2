//! Check-in Service
//!
//! At most one check-in per (shift, employee). The store enforces this with a
//! unique constraint, so concurrent attempts for the same pair cannot both win.

use chrono::{DateTime, Utc};
use shared::AppResult;
use shared::models::CheckIn;

use crate::db::DbService;
use crate::db::repository::{check_in, employee, shift};
use crate::utils::time::truncate_to_seconds;

#[derive(Clone)]
pub struct CheckInService {
    db: DbService,
}

impl CheckInService {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// Record that `employee_id` arrived for `shift_id` at `now` (whole seconds).
    ///
    /// Returns `None` when the shift is not in the organization, the employee
    /// already checked in, or the employee is not in the organization.
    pub async fn check_in(
        &self,
        shift_id: i64,
        employee_id: i64,
        organization_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<CheckIn>> {
        let mut conn = self.db.acquire().await?;

        if !shift::exists(&mut conn, shift_id, organization_id).await? {
            tracing::warn!(organization_id, shift_id, employee_id, "Check-in rejected: unknown shift");
            return Ok(None);
        }
        if check_in::exists(&mut conn, shift_id, employee_id).await? {
            tracing::warn!(organization_id, shift_id, employee_id, "Check-in rejected: already checked in");
            return Ok(None);
        }
        if employee::find_by_id(&mut conn, employee_id, organization_id)
            .await?
            .is_none()
        {
            tracing::warn!(organization_id, shift_id, employee_id, "Check-in rejected: unknown employee");
            return Ok(None);
        }

        let created =
            check_in::insert_if_absent(&mut conn, shift_id, employee_id, truncate_to_seconds(now))
                .await?;
        match &created {
            Some(c) => tracing::info!(organization_id, shift_id, employee_id, check_in_id = c.id, "Employee checked in"),
            None => tracing::warn!(organization_id, shift_id, employee_id, "Check-in rejected: concurrent duplicate"),
        }
        Ok(created)
    }
}
