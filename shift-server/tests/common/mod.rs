// Shared fixtures for the integration tests
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use shared::models::{EmployeeCreate, ManagerCreate, Organization, OrganizationCreate};
use shift_server::{AppState, DbService};
use tempfile::TempDir;

pub const PASSWORD: &str = "correct horse battery";
pub const MAX_SHIFT_MINUTES: i64 = 600;

pub async fn setup() -> AppState {
    let db = DbService::in_memory().await.unwrap();
    AppState::from_db(db, MAX_SHIFT_MINUTES)
}

/// Database file in a fresh temp dir with the production pool settings.
/// Keep the `TempDir` alive for the duration of the test.
pub async fn setup_file_backed() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shifts.db");
    let db = DbService::new(path.to_str().unwrap()).await.unwrap();
    (dir, AppState::from_db(db, MAX_SHIFT_MINUTES))
}

pub async fn create_org(state: &AppState, short_key: &str) -> Organization {
    state
        .identity
        .create_organization(OrganizationCreate {
            name: format!("Org {short_key}"),
            short_key: short_key.to_string(),
            default_photo: None,
        })
        .await
        .unwrap()
}

pub async fn create_manager(state: &AppState, organization_id: i64, username: &str) -> i64 {
    state
        .identity
        .create_manager(
            organization_id,
            ManagerCreate {
                username: username.to_string(),
                password: PASSWORD.to_string(),
            },
        )
        .await
        .unwrap()
        .id
}

pub async fn create_employee(state: &AppState, organization_id: i64, email: &str) -> i64 {
    state
        .identity
        .create_employee(
            organization_id,
            EmployeeCreate {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
                title: None,
            },
        )
        .await
        .unwrap()
        .id
}

/// `2024-01-10T{hh:mm}:00Z`
pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    ts(&format!("2024-01-10T{h:02}:{m:02}:00Z"))
}

pub fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap()
        .with_timezone(&Utc)
}
