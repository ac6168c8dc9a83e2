//! Employee handlers (manager only)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use shared::AppError;
use shared::models::{
    Employee, EmployeeActiveUpdate, EmployeeCreate, EmployeeTitleUpdate, FriendshipCreate, Role,
    RoleAssign,
};

use super::ApiResult;
use crate::auth::Principal;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Vec<Employee>> {
    let employees = state
        .identity
        .list_employees(principal.organization_id)
        .await?;
    Ok(Json(employees))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(data): Json<EmployeeCreate>,
) -> ApiResult<Employee> {
    let employee = state
        .identity
        .create_employee(principal.organization_id, data)
        .await?;
    Ok(Json(employee))
}

pub async fn read(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> ApiResult<Employee> {
    let employee = state
        .identity
        .read_employee(id, principal.organization_id)
        .await?;
    Ok(Json(employee))
}

pub async fn update_title(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(data): Json<EmployeeTitleUpdate>,
) -> ApiResult<Employee> {
    let employee = state
        .identity
        .update_employee_title(id, principal.organization_id, data.title)
        .await?;
    Ok(Json(employee))
}

pub async fn update_active(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(data): Json<EmployeeActiveUpdate>,
) -> ApiResult<Employee> {
    let employee = state
        .identity
        .set_employee_active(id, principal.organization_id, data.active)
        .await?;
    Ok(Json(employee))
}

pub async fn assign_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(data): Json<RoleAssign>,
) -> ApiResult<Vec<Role>> {
    let roles = state
        .identity
        .assign_role(id, principal.organization_id, &data.name)
        .await?;
    Ok(Json(roles))
}

pub async fn add_friend(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(data): Json<FriendshipCreate>,
) -> ApiResult<Vec<i64>> {
    let friends = state
        .identity
        .add_friendship(principal.organization_id, id, data.friend_id)
        .await?;
    Ok(Json(friends))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .identity
        .delete_employee(id, principal.organization_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
