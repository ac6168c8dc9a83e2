//! Schedule Repository (schedules and their scheduled-shift templates)

use super::{RepoError, RepoResult};
use crate::utils::time::{secs_to_time, time_to_secs};
use chrono::NaiveTime;
use shared::models::{Schedule, ScheduledShift};
use sqlx::SqliteConnection;

#[derive(Debug, sqlx::FromRow)]
struct ScheduleRow {
    id: i64,
    organization_id: i64,
    name: String,
    number_of_weeks: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct ScheduledShiftRow {
    id: i64,
    schedule_id: i64,
    day: i64,
    start_secs: i64,
    end_secs: i64,
}

impl ScheduledShiftRow {
    fn into_template(self, employee_ids: Vec<i64>) -> RepoResult<ScheduledShift> {
        let corrupt = || RepoError::Database(format!("Scheduled shift {} has invalid times", self.id));
        Ok(ScheduledShift {
            id: self.id,
            schedule_id: self.schedule_id,
            day: u8::try_from(self.day).map_err(|_| corrupt())?,
            start: secs_to_time(self.start_secs).ok_or_else(corrupt)?,
            end: secs_to_time(self.end_secs).ok_or_else(corrupt)?,
            employee_ids,
        })
    }
}

pub async fn insert(
    conn: &mut SqliteConnection,
    organization_id: i64,
    name: &str,
    number_of_weeks: i32,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO schedules (organization_id, name, number_of_weeks) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(organization_id)
    .bind(name)
    .bind(number_of_weeks)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn exists(
    conn: &mut SqliteConnection,
    id: i64,
    organization_id: i64,
) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM schedules WHERE id = ?1 AND organization_id = ?2",
    )
    .bind(id)
    .bind(organization_id)
    .fetch_optional(conn)
    .await?;
    Ok(found.is_some())
}

/// Schedule with its templates (templates ascending by id)
pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
    organization_id: i64,
) -> RepoResult<Option<Schedule>> {
    let row = sqlx::query_as::<_, ScheduleRow>(
        "SELECT id, organization_id, name, number_of_weeks FROM schedules WHERE id = ?1 AND organization_id = ?2",
    )
    .bind(id)
    .bind(organization_id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => Ok(Some(hydrate(conn, row).await?)),
        None => Ok(None),
    }
}

/// All schedules of the organization, ascending by id
pub async fn find_all(
    conn: &mut SqliteConnection,
    organization_id: i64,
) -> RepoResult<Vec<Schedule>> {
    let rows = sqlx::query_as::<_, ScheduleRow>(
        "SELECT id, organization_id, name, number_of_weeks FROM schedules WHERE organization_id = ? ORDER BY id",
    )
    .bind(organization_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut schedules = Vec::with_capacity(rows.len());
    for row in rows {
        schedules.push(hydrate(conn, row).await?);
    }
    Ok(schedules)
}

async fn hydrate(conn: &mut SqliteConnection, row: ScheduleRow) -> RepoResult<Schedule> {
    let shifts = find_templates(conn, row.id).await?;
    Ok(Schedule {
        id: row.id,
        organization_id: row.organization_id,
        name: row.name,
        number_of_weeks: row.number_of_weeks,
        shifts,
    })
}

async fn find_templates(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> RepoResult<Vec<ScheduledShift>> {
    let rows = sqlx::query_as::<_, ScheduledShiftRow>(
        "SELECT id, schedule_id, day, start_secs, end_secs FROM scheduled_shifts WHERE schedule_id = ? ORDER BY id",
    )
    .bind(schedule_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut templates = Vec::with_capacity(rows.len());
    for row in rows {
        let employee_ids = find_template_employee_ids(conn, row.id).await?;
        templates.push(row.into_template(employee_ids)?);
    }
    Ok(templates)
}

async fn find_template_employee_ids(
    conn: &mut SqliteConnection,
    scheduled_shift_id: i64,
) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT employee_id FROM scheduled_shift_employees WHERE scheduled_shift_id = ? ORDER BY employee_id",
    )
    .bind(scheduled_shift_id)
    .fetch_all(conn)
    .await?;
    Ok(ids)
}

/// Removes templates, their assignments and detaches generated shifts before
/// the schedule row. Callers check ownership first and pass a transaction.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    sqlx::query(
        "DELETE FROM scheduled_shift_employees WHERE scheduled_shift_id IN (SELECT id FROM scheduled_shifts WHERE schedule_id = ?1)",
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    sqlx::query("DELETE FROM scheduled_shifts WHERE schedule_id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("UPDATE shifts SET schedule_id = NULL WHERE schedule_id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM schedules WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

// ── Scheduled shift templates ──────────────────────────────────────

pub async fn insert_template(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    day: u8,
    start: NaiveTime,
    end: NaiveTime,
    employee_ids: &[i64],
) -> RepoResult<ScheduledShift> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO scheduled_shifts (schedule_id, day, start_secs, end_secs) VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(schedule_id)
    .bind(i64::from(day))
    .bind(time_to_secs(start))
    .bind(time_to_secs(end))
    .fetch_one(&mut *conn)
    .await?;

    for employee_id in employee_ids {
        sqlx::query(
            "INSERT INTO scheduled_shift_employees (scheduled_shift_id, employee_id) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(*employee_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(ScheduledShift {
        id,
        schedule_id,
        day,
        start,
        end,
        employee_ids: employee_ids.to_vec(),
    })
}

/// True when the template belongs to the schedule and the schedule to the organization
pub async fn template_exists(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    scheduled_shift_id: i64,
    organization_id: i64,
) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT ss.id FROM scheduled_shifts ss JOIN schedules s ON s.id = ss.schedule_id WHERE ss.id = ?1 AND ss.schedule_id = ?2 AND s.organization_id = ?3",
    )
    .bind(scheduled_shift_id)
    .bind(schedule_id)
    .bind(organization_id)
    .fetch_optional(conn)
    .await?;
    Ok(found.is_some())
}

pub async fn delete_template(conn: &mut SqliteConnection, scheduled_shift_id: i64) -> RepoResult<()> {
    sqlx::query("DELETE FROM scheduled_shift_employees WHERE scheduled_shift_id = ?1")
        .bind(scheduled_shift_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM scheduled_shifts WHERE id = ?1")
        .bind(scheduled_shift_id)
        .execute(conn)
        .await?;
    Ok(())
}
