//! Login / logout handlers

use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde::Deserialize;
use shared::models::LoginResponse;
use shared::{ApiResponse, AppError};
use validator::Validate;

use super::ApiResult;
use crate::auth::{Principal, PrincipalKind, extract_credential};
use crate::state::AppState;
use crate::utils::validation::from_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct ManagerLoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EmployeeLoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub short_key: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

pub async fn manager_login(
    State(state): State<AppState>,
    Json(req): Json<ManagerLoginRequest>,
) -> ApiResult<LoginResponse> {
    req.validate().map_err(from_validation_errors)?;
    let response = state
        .identity
        .login_manager(&req.username, &req.password)
        .await?;
    Ok(Json(response))
}

pub async fn employee_login(
    State(state): State<AppState>,
    Json(req): Json<EmployeeLoginRequest>,
) -> ApiResult<LoginResponse> {
    req.validate().map_err(from_validation_errors)?;
    let response = state
        .identity
        .login_employee(&req.short_key, &req.email, &req.password)
        .await?;
    Ok(Json(response))
}

/// Revoke the token used for this request
pub async fn logout(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
) -> ApiResult<ApiResponse<()>> {
    if principal.kind == PrincipalKind::Organization {
        return Err(AppError::validation("API keys cannot be logged out; rotate the key instead"));
    }
    let credential = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_credential)
        .ok_or_else(AppError::unauthorized)?;
    state.identity.logout(credential).await?;
    Ok(Json(ApiResponse::ok()))
}
