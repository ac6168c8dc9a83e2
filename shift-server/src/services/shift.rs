//! Shift Service - dated shift instances
//!
//! All bounds are absolute UTC instants. Range queries are inclusive on both
//! ends; "now" is always passed in by the caller.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use shared::models::{OngoingShift, Shift};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqliteConnection;

use super::normalize_ids;
use crate::db::DbService;
use crate::db::repository::{RepoError, check_in, employee, organization, schedule, shift};
use crate::utils::time::{day_window, parse_timestamp, quarter_hour, round_up, truncate_to_millis};

#[derive(Clone)]
pub struct ShiftService {
    db: DbService,
}

/// Replacement state for [`ShiftService::update`]
#[derive(Debug, Clone)]
pub struct ShiftChanges<'a> {
    pub employee_ids: &'a [i64],
    pub check_in_ids: &'a [i64],
    pub start: &'a str,
    pub end: &'a str,
}

fn shift_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ShiftNotFound, format!("Shift {id} not found"))
}

fn validate_range(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
    if end <= start {
        return Err(AppError::with_message(
            ErrorCode::ShiftInvalidRange,
            "Shift end must be after its start",
        )
        .with_detail("start", start.to_rfc3339())
        .with_detail("end", end.to_rfc3339()));
    }
    Ok(())
}

/// Insert a shift with the in-organization subset of `employee_ids` as roster
async fn insert_shift(
    conn: &mut SqliteConnection,
    organization_id: i64,
    schedule_id: Option<i64>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    employee_ids: &[i64],
) -> AppResult<i64> {
    let roster =
        employee::filter_in_organization(conn, organization_id, &normalize_ids(employee_ids))
            .await?;
    let id = shift::insert(conn, organization_id, schedule_id, start, end).await?;
    shift::add_to_roster(conn, id, &roster).await?;
    Ok(id)
}

impl ShiftService {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Without a window: every shift. With `(from, to)`: shifts where
    /// `end >= from && start <= to`.
    pub async fn list_by_organization(
        &self,
        organization_id: i64,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> AppResult<Vec<Shift>> {
        let mut conn = self.db.acquire().await?;
        Ok(shift::find_all(&mut conn, organization_id, window).await?)
    }

    /// Shifts touching `[date 00:00, next day 00:00]` (UTC)
    pub async fn list_for_day(&self, organization_id: i64, date: NaiveDate) -> AppResult<Vec<Shift>> {
        self.list_by_organization(organization_id, Some(day_window(date)))
            .await
    }

    /// Shifts with `start <= now <= end`
    pub async fn list_ongoing(&self, organization_id: i64, now: DateTime<Utc>) -> AppResult<Vec<Shift>> {
        let mut conn = self.db.acquire().await?;
        Ok(shift::find_ongoing(&mut conn, organization_id, now).await?)
    }

    /// Ongoing shifts with the roster resolved to employees
    pub async fn ongoing_view(
        &self,
        organization_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<OngoingShift>> {
        let mut conn = self.db.acquire().await?;
        let shifts = shift::find_ongoing(&mut conn, organization_id, now).await?;

        let mut views = Vec::with_capacity(shifts.len());
        for s in shifts {
            let employees = employee::find_many(&mut conn, organization_id, &s.employee_ids).await?;
            views.push(OngoingShift {
                id: s.id,
                start: s.start,
                end: s.end,
                checked_in_employee_ids: s.checked_in_employee_ids(),
                employees,
            });
        }
        Ok(views)
    }

    /// Whether the organization has any ongoing shift
    pub async fn is_open(&self, short_key: &str, now: DateTime<Utc>) -> AppResult<bool> {
        let mut conn = self.db.acquire().await?;
        let org = organization::find_by_short_key(&mut conn, short_key)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::OrganizationNotFound).with_detail("short_key", short_key)
            })?;
        Ok(shift::any_ongoing(&mut conn, org.id, now).await?)
    }

    pub async fn read(&self, id: i64, organization_id: i64) -> AppResult<Shift> {
        let mut conn = self.db.acquire().await?;
        shift::find_by_id(&mut conn, id, organization_id)
            .await?
            .ok_or_else(|| shift_not_found(id))
    }

    // ── Creation ───────────────────────────────────────────────────

    /// Ad-hoc shift. Employee ids outside the organization are dropped; a
    /// source schedule, if given, must belong to the organization. Bounds are
    /// kept to millisecond precision.
    pub async fn create_shift(
        &self,
        organization_id: i64,
        employee_ids: &[i64],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        schedule_id: Option<i64>,
    ) -> AppResult<Shift> {
        let (start, end) = (truncate_to_millis(start), truncate_to_millis(end));
        validate_range(start, end)?;

        let mut tx = self.db.begin().await?;
        if let Some(schedule_id) = schedule_id
            && !schedule::exists(&mut tx, schedule_id, organization_id).await?
        {
            return Err(AppError::with_message(
                ErrorCode::ScheduleNotFound,
                format!("Schedule {schedule_id} not found"),
            ));
        }
        let id = insert_shift(&mut tx, organization_id, schedule_id, start, end, employee_ids).await?;
        let created = shift::find_by_id(&mut tx, id, organization_id)
            .await?
            .ok_or_else(|| shift_not_found(id))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            organization_id,
            shift_id = id,
            minutes = created.duration().num_minutes(),
            "Shift created"
        );
        Ok(created)
    }

    /// Shift starting at the next quarter hour (an exact boundary is kept)
    /// and lasting `open_minutes`. Unknown employee ids are dropped.
    pub async fn create_outside_schedule(
        &self,
        organization_id: i64,
        employee_ids: &[i64],
        open_minutes: u32,
        now: DateTime<Utc>,
    ) -> AppResult<Shift> {
        if open_minutes == 0 {
            return Err(AppError::validation("open_minutes must be greater than 0"));
        }
        let start = round_up(now, quarter_hour())?;
        let end = start + TimeDelta::minutes(i64::from(open_minutes));
        self.create_shift(organization_id, employee_ids, start, end, None)
            .await
    }

    /// Ad-hoc shift capped at `max_duration_minutes`
    pub async fn create_limited_shift(
        &self,
        organization_id: i64,
        employee_ids: &[i64],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        max_duration_minutes: i64,
    ) -> AppResult<Shift> {
        validate_range(start, end)?;
        let max = TimeDelta::try_minutes(max_duration_minutes)
            .ok_or_else(|| AppError::validation("Invalid maximum shift duration"))?;
        if end - start > max {
            tracing::warn!(
                organization_id,
                minutes = (end - start).num_minutes(),
                max_duration_minutes,
                "Shift rejected: duration exceeds limit"
            );
            return Err(AppError::new(ErrorCode::ShiftDurationExceeded)
                .with_detail("max_minutes", max_duration_minutes));
        }
        self.create_shift(organization_id, employee_ids, start, end, None)
            .await
    }

    // ── Mutation ───────────────────────────────────────────────────

    /// Replace bounds and roster, and keep only the listed check-ins.
    ///
    /// The roster becomes exactly the in-organization subset of
    /// `employee_ids` (diffed against the current one). Check-ins not listed
    /// in `check_in_ids` are deleted; kept ones are left untouched.
    pub async fn update(
        &self,
        shift_id: i64,
        organization_id: i64,
        changes: ShiftChanges<'_>,
    ) -> AppResult<Shift> {
        let start = parse_timestamp(changes.start)?;
        let end = parse_timestamp(changes.end)?;
        validate_range(start, end)?;

        let mut tx = self.db.begin().await?;
        if !shift::exists(&mut tx, shift_id, organization_id).await? {
            return Err(shift_not_found(shift_id));
        }

        let wanted = employee::filter_in_organization(
            &mut tx,
            organization_id,
            &normalize_ids(changes.employee_ids),
        )
        .await?;
        let current = shift::find_roster(&mut tx, shift_id).await?;
        let removed: Vec<i64> = current
            .iter()
            .filter(|id| !wanted.contains(id))
            .copied()
            .collect();
        let added: Vec<i64> = wanted
            .iter()
            .filter(|id| !current.contains(id))
            .copied()
            .collect();
        shift::remove_from_roster(&mut tx, shift_id, &removed).await?;
        shift::add_to_roster(&mut tx, shift_id, &added).await?;

        let pruned: Vec<i64> = check_in::find_for_shift(&mut tx, shift_id)
            .await?
            .into_iter()
            .map(|c| c.id)
            .filter(|id| !changes.check_in_ids.contains(id))
            .collect();
        check_in::delete_many(&mut tx, shift_id, &pruned).await?;

        shift::update_times(&mut tx, shift_id, start, end).await?;
        let updated = shift::find_by_id(&mut tx, shift_id, organization_id)
            .await?
            .ok_or_else(|| shift_not_found(shift_id))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            organization_id,
            shift_id,
            added = added.len(),
            removed = removed.len(),
            pruned_check_ins = pruned.len(),
            "Shift updated"
        );
        Ok(updated)
    }

    pub async fn delete(&self, shift_id: i64, organization_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        if !shift::exists(&mut tx, shift_id, organization_id).await? {
            return Err(shift_not_found(shift_id));
        }
        shift::delete(&mut tx, shift_id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(organization_id, shift_id, "Shift deleted");
        Ok(())
    }
}
