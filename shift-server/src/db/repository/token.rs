//! Token Repository
//!
//! Tokens never expire; revocation deletes the row.

use super::RepoResult;
use sqlx::SqliteConnection;

/// Owner of a token together with its organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct TokenOwner {
    pub owner_id: i64,
    pub organization_id: i64,
}

pub async fn insert_for_manager(
    conn: &mut SqliteConnection,
    token: &str,
    manager_id: i64,
    created_at: i64,
) -> RepoResult<()> {
    sqlx::query("INSERT INTO tokens (token, manager_id, created_at) VALUES (?1, ?2, ?3)")
        .bind(token)
        .bind(manager_id)
        .bind(created_at)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn insert_for_employee(
    conn: &mut SqliteConnection,
    token: &str,
    employee_id: i64,
    created_at: i64,
) -> RepoResult<()> {
    sqlx::query("INSERT INTO tokens (token, employee_id, created_at) VALUES (?1, ?2, ?3)")
        .bind(token)
        .bind(employee_id)
        .bind(created_at)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn find_manager(
    conn: &mut SqliteConnection,
    token: &str,
) -> RepoResult<Option<TokenOwner>> {
    let owner = sqlx::query_as::<_, TokenOwner>(
        "SELECT m.id AS owner_id, m.organization_id FROM tokens t JOIN managers m ON m.id = t.manager_id WHERE t.token = ?",
    )
    .bind(token)
    .fetch_optional(conn)
    .await?;
    Ok(owner)
}

pub async fn find_employee(
    conn: &mut SqliteConnection,
    token: &str,
) -> RepoResult<Option<TokenOwner>> {
    let owner = sqlx::query_as::<_, TokenOwner>(
        "SELECT e.id AS owner_id, e.organization_id FROM tokens t JOIN employees e ON e.id = t.employee_id WHERE t.token = ? AND e.active = 1",
    )
    .bind(token)
    .fetch_optional(conn)
    .await?;
    Ok(owner)
}

/// Returns `false` when the token did not exist
pub async fn delete(conn: &mut SqliteConnection, token: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM tokens WHERE token = ?")
        .bind(token)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
