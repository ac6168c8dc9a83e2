//! Organization Model (tenant root)

use serde::{Deserialize, Serialize};

/// Organization entity
///
/// Every other entity is scoped to exactly one organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Organization {
    pub id: i64,
    pub name: String,
    /// Short human-readable key, unique across organizations
    pub short_key: String,
    /// Server-to-server / device credential, unique across organizations
    pub api_key: String,
    /// Reference to the default employee photo (blob storage is external)
    pub default_photo: Option<String>,
}

/// Create organization payload (administrative)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationCreate {
    pub name: String,
    pub short_key: String,
    #[serde(default)]
    pub default_photo: Option<String>,
}

/// Public "is open" answer for an organization
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OpenStatus {
    pub open: bool,
}
