//! Role Repository

use super::RepoResult;
use shared::models::Role;
use sqlx::SqliteConnection;

/// Role by name, created on first use
pub async fn find_or_create(conn: &mut SqliteConnection, name: &str) -> RepoResult<Role> {
    sqlx::query("INSERT INTO roles (name) VALUES (?) ON CONFLICT (name) DO NOTHING")
        .bind(name)
        .execute(&mut *conn)
        .await?;
    let role = sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = ?")
        .bind(name)
        .fetch_one(conn)
        .await?;
    Ok(role)
}

/// Idempotent
pub async fn link_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    role_id: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO employee_roles (employee_id, role_id) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
    )
    .bind(employee_id)
    .bind(role_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> RepoResult<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>(
        "SELECT r.id, r.name FROM roles r JOIN employee_roles er ON er.role_id = r.id WHERE er.employee_id = ? ORDER BY r.id",
    )
    .bind(employee_id)
    .fetch_all(conn)
    .await?;
    Ok(roles)
}
