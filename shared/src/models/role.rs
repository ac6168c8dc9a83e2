//! Role Model

use serde::{Deserialize, Serialize};

/// Role entity, linked to employees through `employee_roles`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// Assign role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssign {
    pub name: String,
}
