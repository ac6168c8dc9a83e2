//! Manager Model

use serde::{Deserialize, Serialize};

/// Manager (without password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Manager {
    pub id: i64,
    pub organization_id: i64,
    pub username: String,
}

/// Create manager payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerCreate {
    pub username: String,
    pub password: String,
}

/// Issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub organization_id: i64,
}
