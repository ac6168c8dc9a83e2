//! Manager Repository

use super::RepoResult;
use sqlx::SqliteConnection;

/// Manager row with the password hash (internal use only)
#[derive(Debug, sqlx::FromRow)]
pub struct ManagerCredentials {
    pub id: i64,
    pub organization_id: i64,
    pub hash_pass: String,
}

pub async fn insert(
    conn: &mut SqliteConnection,
    organization_id: i64,
    username: &str,
    hash_pass: &str,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO managers (organization_id, username, hash_pass) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(organization_id)
    .bind(username)
    .bind(hash_pass)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn find_credentials(
    conn: &mut SqliteConnection,
    username: &str,
) -> RepoResult<Option<ManagerCredentials>> {
    let row = sqlx::query_as::<_, ManagerCredentials>(
        "SELECT id, organization_id, hash_pass FROM managers WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}
