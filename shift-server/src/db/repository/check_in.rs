//! Check-in Repository

use super::RepoResult;
use chrono::{DateTime, Utc};
use shared::models::CheckIn;
use shared::util::{from_millis, to_millis};
use sqlx::SqliteConnection;

#[derive(Debug, sqlx::FromRow)]
struct CheckInRow {
    id: i64,
    shift_id: i64,
    employee_id: i64,
    time_ms: i64,
}

impl From<CheckInRow> for CheckIn {
    fn from(row: CheckInRow) -> Self {
        CheckIn {
            id: row.id,
            shift_id: row.shift_id,
            employee_id: row.employee_id,
            time: from_millis(row.time_ms),
        }
    }
}

/// Insert unless the employee already checked in to the shift.
/// Returns the new check-in, or `None` when the pair already exists.
pub async fn insert_if_absent(
    conn: &mut SqliteConnection,
    shift_id: i64,
    employee_id: i64,
    time: DateTime<Utc>,
) -> RepoResult<Option<CheckIn>> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO check_ins (shift_id, employee_id, time_ms) VALUES (?1, ?2, ?3) ON CONFLICT (shift_id, employee_id) DO NOTHING RETURNING id",
    )
    .bind(shift_id)
    .bind(employee_id)
    .bind(to_millis(time))
    .fetch_optional(conn)
    .await?;

    Ok(id.map(|id| CheckIn {
        id,
        shift_id,
        employee_id,
        time,
    }))
}

pub async fn exists(
    conn: &mut SqliteConnection,
    shift_id: i64,
    employee_id: i64,
) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM check_ins WHERE shift_id = ?1 AND employee_id = ?2",
    )
    .bind(shift_id)
    .bind(employee_id)
    .fetch_optional(conn)
    .await?;
    Ok(found.is_some())
}

/// Check-ins of a shift in creation order
pub async fn find_for_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> RepoResult<Vec<CheckIn>> {
    let rows = sqlx::query_as::<_, CheckInRow>(
        "SELECT id, shift_id, employee_id, time_ms FROM check_ins WHERE shift_id = ? ORDER BY id",
    )
    .bind(shift_id)
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(CheckIn::from).collect())
}

pub async fn delete_many(
    conn: &mut SqliteConnection,
    shift_id: i64,
    check_in_ids: &[i64],
) -> RepoResult<()> {
    for id in check_in_ids {
        sqlx::query("DELETE FROM check_ins WHERE id = ?1 AND shift_id = ?2")
            .bind(*id)
            .bind(shift_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
