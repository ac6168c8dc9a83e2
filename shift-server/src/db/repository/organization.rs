//! Organization Repository

use super::RepoResult;
use shared::models::Organization;
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, name, short_key, api_key, default_photo";

pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    short_key: &str,
    api_key: &str,
    default_photo: Option<&str>,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO organizations (name, short_key, api_key, default_photo) VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(name)
    .bind(short_key)
    .bind(api_key)
    .bind(default_photo)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Organization>> {
    let org = sqlx::query_as::<_, Organization>(&format!(
        "SELECT {COLUMNS} FROM organizations WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(org)
}

pub async fn find_by_short_key(
    conn: &mut SqliteConnection,
    short_key: &str,
) -> RepoResult<Option<Organization>> {
    let org = sqlx::query_as::<_, Organization>(&format!(
        "SELECT {COLUMNS} FROM organizations WHERE short_key = ?"
    ))
    .bind(short_key)
    .fetch_optional(conn)
    .await?;
    Ok(org)
}

/// Organization id owning the API key
pub async fn find_id_by_api_key(
    conn: &mut SqliteConnection,
    api_key: &str,
) -> RepoResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM organizations WHERE api_key = ?")
        .bind(api_key)
        .fetch_optional(conn)
        .await?;
    Ok(id)
}

/// Returns `false` when the organization does not exist
pub async fn update_api_key(
    conn: &mut SqliteConnection,
    id: i64,
    api_key: &str,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE organizations SET api_key = ?1 WHERE id = ?2")
        .bind(api_key)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
