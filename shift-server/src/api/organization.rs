//! Organization administration (manager only)

use axum::extract::State;
use axum::{Extension, Json};
use shared::models::{Manager, ManagerCreate, Organization};

use super::ApiResult;
use crate::auth::Principal;
use crate::state::AppState;

/// Issue a new API key; devices using the old one are rejected from now on
pub async fn rotate_api_key(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Organization> {
    let org = state
        .identity
        .rotate_api_key(principal.organization_id)
        .await?;
    Ok(Json(org))
}

/// Add another manager to the caller's organization
pub async fn create_manager(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(data): Json<ManagerCreate>,
) -> ApiResult<Manager> {
    let manager = state
        .identity
        .create_manager(principal.organization_id, data)
        .await?;
    Ok(Json(manager))
}
