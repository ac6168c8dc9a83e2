//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee (without password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub organization_id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique within the organization
    pub email: String,
    pub title: Option<String>,
    pub active: bool,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Update employee title payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeTitleUpdate {
    pub title: Option<String>,
}

/// Activate / deactivate employee payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmployeeActiveUpdate {
    pub active: bool,
}

/// Add friendship payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FriendshipCreate {
    pub friend_id: i64,
}
