//! Shift Repository (dated shifts and their rosters)

use super::{RepoResult, check_in};
use chrono::{DateTime, Utc};
use shared::models::Shift;
use shared::util::{from_millis, to_millis};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, organization_id, schedule_id, start_ms, end_ms";

#[derive(Debug, sqlx::FromRow)]
struct ShiftRow {
    id: i64,
    organization_id: i64,
    schedule_id: Option<i64>,
    start_ms: i64,
    end_ms: i64,
}

pub async fn insert(
    conn: &mut SqliteConnection,
    organization_id: i64,
    schedule_id: Option<i64>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO shifts (organization_id, schedule_id, start_ms, end_ms) VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(organization_id)
    .bind(schedule_id)
    .bind(to_millis(start))
    .bind(to_millis(end))
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn exists(
    conn: &mut SqliteConnection,
    id: i64,
    organization_id: i64,
) -> RepoResult<bool> {
    let found =
        sqlx::query_scalar::<_, i64>("SELECT id FROM shifts WHERE id = ?1 AND organization_id = ?2")
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await?;
    Ok(found.is_some())
}

/// Shift with roster and check-ins
pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
    organization_id: i64,
) -> RepoResult<Option<Shift>> {
    let row = sqlx::query_as::<_, ShiftRow>(&format!(
        "SELECT {COLUMNS} FROM shifts WHERE id = ?1 AND organization_id = ?2"
    ))
    .bind(id)
    .bind(organization_id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => Ok(Some(hydrate(conn, row).await?)),
        None => Ok(None),
    }
}

/// All shifts, or only those with `end >= from && start <= to` when a window
/// is given. Ordered by start, then id.
pub async fn find_all(
    conn: &mut SqliteConnection,
    organization_id: i64,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> RepoResult<Vec<Shift>> {
    let rows = match window {
        Some((from, to)) => {
            sqlx::query_as::<_, ShiftRow>(&format!(
                "SELECT {COLUMNS} FROM shifts WHERE organization_id = ?1 AND end_ms >= ?2 AND start_ms <= ?3 ORDER BY start_ms, id"
            ))
            .bind(organization_id)
            .bind(to_millis(from))
            .bind(to_millis(to))
            .fetch_all(&mut *conn)
            .await?
        }
        None => {
            sqlx::query_as::<_, ShiftRow>(&format!(
                "SELECT {COLUMNS} FROM shifts WHERE organization_id = ?1 ORDER BY start_ms, id"
            ))
            .bind(organization_id)
            .fetch_all(&mut *conn)
            .await?
        }
    };

    let mut shifts = Vec::with_capacity(rows.len());
    for row in rows {
        shifts.push(hydrate(conn, row).await?);
    }
    Ok(shifts)
}

/// Shifts with `start <= at <= end`
pub async fn find_ongoing(
    conn: &mut SqliteConnection,
    organization_id: i64,
    at: DateTime<Utc>,
) -> RepoResult<Vec<Shift>> {
    find_all(conn, organization_id, Some((at, at))).await
}

pub async fn any_ongoing(
    conn: &mut SqliteConnection,
    organization_id: i64,
    at: DateTime<Utc>,
) -> RepoResult<bool> {
    let at = to_millis(at);
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM shifts WHERE organization_id = ?1 AND start_ms <= ?2 AND end_ms >= ?2 LIMIT 1",
    )
    .bind(organization_id)
    .bind(at)
    .fetch_optional(conn)
    .await?;
    Ok(found.is_some())
}

async fn hydrate(conn: &mut SqliteConnection, row: ShiftRow) -> RepoResult<Shift> {
    let employee_ids = find_roster(conn, row.id).await?;
    let check_ins = check_in::find_for_shift(conn, row.id).await?;
    Ok(Shift {
        id: row.id,
        organization_id: row.organization_id,
        schedule_id: row.schedule_id,
        start: from_millis(row.start_ms),
        end: from_millis(row.end_ms),
        employee_ids,
        check_ins,
    })
}

pub async fn update_times(
    conn: &mut SqliteConnection,
    id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> RepoResult<()> {
    sqlx::query("UPDATE shifts SET start_ms = ?1, end_ms = ?2 WHERE id = ?3")
        .bind(to_millis(start))
        .bind(to_millis(end))
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Removes check-ins and roster entries before the shift row
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    sqlx::query("DELETE FROM check_ins WHERE shift_id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM shift_employees WHERE shift_id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM shifts WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

// ── Roster ─────────────────────────────────────────────────────────

/// Employee ids on the roster, ascending
pub async fn find_roster(conn: &mut SqliteConnection, shift_id: i64) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT employee_id FROM shift_employees WHERE shift_id = ? ORDER BY employee_id",
    )
    .bind(shift_id)
    .fetch_all(conn)
    .await?;
    Ok(ids)
}

pub async fn add_to_roster(
    conn: &mut SqliteConnection,
    shift_id: i64,
    employee_ids: &[i64],
) -> RepoResult<()> {
    for employee_id in employee_ids {
        sqlx::query(
            "INSERT INTO shift_employees (shift_id, employee_id) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        )
        .bind(shift_id)
        .bind(*employee_id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

pub async fn remove_from_roster(
    conn: &mut SqliteConnection,
    shift_id: i64,
    employee_ids: &[i64],
) -> RepoResult<()> {
    for employee_id in employee_ids {
        sqlx::query("DELETE FROM shift_employees WHERE shift_id = ?1 AND employee_id = ?2")
            .bind(shift_id)
            .bind(*employee_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
