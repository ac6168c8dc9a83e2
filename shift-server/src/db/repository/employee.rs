//! Employee Repository

use super::RepoResult;
use shared::models::Employee;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

const COLUMNS: &str = "id, organization_id, first_name, last_name, email, title, active";

/// Removal order for an employee and everything that references them.
/// `?1` is the employee id; the employee row goes last.
const DELETE_CASCADE: &[&str] = &[
    "DELETE FROM shift_employees WHERE employee_id = ?1",
    "DELETE FROM scheduled_shift_employees WHERE employee_id = ?1",
    "DELETE FROM check_ins WHERE employee_id = ?1",
    "DELETE FROM tokens WHERE employee_id = ?1",
    "DELETE FROM employee_roles WHERE employee_id = ?1",
    "DELETE FROM employee_friendships WHERE employee_id = ?1 OR friend_id = ?1",
    "DELETE FROM employees WHERE id = ?1",
];

/// Employee row with the password hash (internal use only)
#[derive(Debug, sqlx::FromRow)]
pub struct EmployeeCredentials {
    pub id: i64,
    pub organization_id: i64,
    pub active: bool,
    pub hash_pass: String,
}

pub struct NewEmployee<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub hash_pass: &'a str,
    pub title: Option<&'a str>,
}

pub async fn insert(
    conn: &mut SqliteConnection,
    organization_id: i64,
    data: NewEmployee<'_>,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employees (organization_id, first_name, last_name, email, hash_pass, title, active) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1) RETURNING id",
    )
    .bind(organization_id)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.email)
    .bind(data.hash_pass)
    .bind(data.title)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
    organization_id: i64,
) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE id = ?1 AND organization_id = ?2"
    ))
    .bind(id)
    .bind(organization_id)
    .fetch_optional(conn)
    .await?;
    Ok(employee)
}

pub async fn find_all(
    conn: &mut SqliteConnection,
    organization_id: i64,
) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE organization_id = ? ORDER BY id"
    ))
    .bind(organization_id)
    .fetch_all(conn)
    .await?;
    Ok(employees)
}

/// Employees of the organization among `ids`, ascending by id
pub async fn find_many(
    conn: &mut SqliteConnection,
    organization_id: i64,
    ids: &[i64],
) -> RepoResult<Vec<Employee>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {COLUMNS} FROM employees WHERE organization_id = "
    ));
    qb.push_bind(organization_id);
    qb.push(" AND id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY id");
    let employees = qb.build_query_as::<Employee>().fetch_all(conn).await?;
    Ok(employees)
}

/// Subset of `ids` that belong to the organization (deduplicated, ascending)
pub async fn filter_in_organization(
    conn: &mut SqliteConnection,
    organization_id: i64,
    ids: &[i64],
) -> RepoResult<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT id FROM employees WHERE organization_id = ");
    qb.push_bind(organization_id);
    qb.push(" AND id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY id");
    let found = qb.build_query_scalar::<i64>().fetch_all(conn).await?;
    Ok(found)
}

/// Login lookup: organization short key + email
pub async fn find_credentials(
    conn: &mut SqliteConnection,
    short_key: &str,
    email: &str,
) -> RepoResult<Option<EmployeeCredentials>> {
    let row = sqlx::query_as::<_, EmployeeCredentials>(
        "SELECT e.id, e.organization_id, e.active, e.hash_pass FROM employees e JOIN organizations o ON o.id = e.organization_id WHERE o.short_key = ?1 AND e.email = ?2",
    )
    .bind(short_key)
    .bind(email)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Returns `false` when no employee matched in the organization
pub async fn update_title(
    conn: &mut SqliteConnection,
    id: i64,
    organization_id: i64,
    title: Option<&str>,
) -> RepoResult<bool> {
    let rows =
        sqlx::query("UPDATE employees SET title = ?1 WHERE id = ?2 AND organization_id = ?3")
            .bind(title)
            .bind(id)
            .bind(organization_id)
            .execute(conn)
            .await?;
    Ok(rows.rows_affected() > 0)
}

/// Returns `false` when no employee matched in the organization
pub async fn update_active(
    conn: &mut SqliteConnection,
    id: i64,
    organization_id: i64,
    active: bool,
) -> RepoResult<bool> {
    let rows =
        sqlx::query("UPDATE employees SET active = ?1 WHERE id = ?2 AND organization_id = ?3")
            .bind(active)
            .bind(id)
            .bind(organization_id)
            .execute(conn)
            .await?;
    Ok(rows.rows_affected() > 0)
}

/// Idempotent; both directions are stored
pub async fn add_friendship(
    conn: &mut SqliteConnection,
    employee_id: i64,
    friend_id: i64,
) -> RepoResult<()> {
    for (a, b) in [(employee_id, friend_id), (friend_id, employee_id)] {
        sqlx::query(
            "INSERT INTO employee_friendships (employee_id, friend_id) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        )
        .bind(a)
        .bind(b)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

pub async fn find_friend_ids(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT friend_id FROM employee_friendships WHERE employee_id = ? ORDER BY friend_id",
    )
    .bind(employee_id)
    .fetch_all(conn)
    .await?;
    Ok(ids)
}

/// Run the ordered cascade. Callers must already have checked that the
/// employee belongs to their organization and should pass a transaction.
pub async fn delete_cascade(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    for statement in DELETE_CASCADE {
        sqlx::query(statement).bind(id).execute(&mut *conn).await?;
    }
    Ok(())
}
