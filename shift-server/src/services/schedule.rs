//! Schedule Service - recurring templates
//!
//! A schedule repeats every `number_of_weeks` weeks and owns scheduled-shift
//! templates (day-of-week + time-of-day range + assigned employees). Templates
//! are never materialized into dated shifts automatically.

use chrono::NaiveTime;
use shared::models::{Schedule, ScheduledShift, weekday_from_index};
use shared::{AppError, AppResult, ErrorCode};

use super::normalize_ids;
use crate::db::DbService;
use crate::db::repository::{RepoError, employee, schedule};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

#[derive(Clone)]
pub struct ScheduleService {
    db: DbService,
}

fn schedule_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ScheduleNotFound, format!("Schedule {id} not found"))
}

impl ScheduleService {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub async fn create_schedule(
        &self,
        organization_id: i64,
        name: &str,
        number_of_weeks: i32,
    ) -> AppResult<Schedule> {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
        if number_of_weeks <= 0 {
            return Err(AppError::validation("number_of_weeks must be greater than 0")
                .with_detail("number_of_weeks", number_of_weeks));
        }

        let mut conn = self.db.acquire().await?;
        let id = schedule::insert(&mut conn, organization_id, name.trim(), number_of_weeks).await?;

        tracing::info!(organization_id, schedule_id = id, number_of_weeks, "Schedule created");
        Ok(Schedule {
            id,
            organization_id,
            name: name.trim().to_string(),
            number_of_weeks,
            shifts: Vec::new(),
        })
    }

    /// Add a template. Every employee id must belong to the organization,
    /// otherwise nothing is written.
    pub async fn add_scheduled_shift(
        &self,
        schedule_id: i64,
        organization_id: i64,
        day: u8,
        start: NaiveTime,
        end: NaiveTime,
        employee_ids: &[i64],
    ) -> AppResult<ScheduledShift> {
        if weekday_from_index(day).is_none() {
            return Err(AppError::validation(format!(
                "day must be between 0 (Monday) and 6 (Sunday), got {day}"
            )));
        }
        if start == end {
            return Err(AppError::new(ErrorCode::ScheduledShiftEmpty));
        }

        let employee_ids = normalize_ids(employee_ids);
        let mut tx = self.db.begin().await?;
        if !schedule::exists(&mut tx, schedule_id, organization_id).await? {
            return Err(schedule_not_found(schedule_id));
        }
        let found = employee::filter_in_organization(&mut tx, organization_id, &employee_ids).await?;
        if found.len() != employee_ids.len() {
            let unknown: Vec<i64> = employee_ids
                .iter()
                .filter(|id| !found.contains(id))
                .copied()
                .collect();
            return Err(
                AppError::validation("Employees do not belong to the organization")
                    .with_detail("employee_ids", unknown),
            );
        }

        let template =
            schedule::insert_template(&mut tx, schedule_id, day, start, end, &employee_ids).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            organization_id,
            schedule_id,
            scheduled_shift_id = template.id,
            overnight = template.crosses_midnight(),
            minutes = template.duration().num_minutes(),
            "Scheduled shift added"
        );
        Ok(template)
    }

    pub async fn read_schedule(&self, id: i64, organization_id: i64) -> AppResult<Schedule> {
        let mut conn = self.db.acquire().await?;
        schedule::find_by_id(&mut conn, id, organization_id)
            .await?
            .ok_or_else(|| schedule_not_found(id))
    }

    /// All schedules ordered by id ascending
    pub async fn read_all_for_organization(&self, organization_id: i64) -> AppResult<Vec<Schedule>> {
        let mut conn = self.db.acquire().await?;
        Ok(schedule::find_all(&mut conn, organization_id).await?)
    }

    /// Remove a schedule with its templates; shifts generated from it are kept
    /// but detached.
    pub async fn delete_schedule(&self, id: i64, organization_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        if !schedule::exists(&mut tx, id, organization_id).await? {
            return Err(schedule_not_found(id));
        }
        schedule::delete(&mut tx, id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(organization_id, schedule_id = id, "Schedule deleted");
        Ok(())
    }

    pub async fn delete_scheduled_shift(
        &self,
        schedule_id: i64,
        scheduled_shift_id: i64,
        organization_id: i64,
    ) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        if !schedule::template_exists(&mut tx, schedule_id, scheduled_shift_id, organization_id)
            .await?
        {
            return Err(AppError::with_message(
                ErrorCode::ScheduledShiftNotFound,
                format!("Scheduled shift {scheduled_shift_id} not found"),
            ));
        }
        schedule::delete_template(&mut tx, scheduled_shift_id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(organization_id, schedule_id, scheduled_shift_id, "Scheduled shift deleted");
        Ok(())
    }
}
