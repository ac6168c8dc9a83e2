//! Schedule handlers (manager only)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use shared::AppError;
use shared::models::{Schedule, ScheduleCreate, ScheduledShift, ScheduledShiftCreate};

use super::ApiResult;
use crate::auth::Principal;
use crate::state::AppState;
use crate::utils::time::parse_time_of_day;

pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Vec<Schedule>> {
    let schedules = state
        .schedules
        .read_all_for_organization(principal.organization_id)
        .await?;
    Ok(Json(schedules))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(data): Json<ScheduleCreate>,
) -> ApiResult<Schedule> {
    let schedule = state
        .schedules
        .create_schedule(principal.organization_id, &data.name, data.number_of_weeks)
        .await?;
    Ok(Json(schedule))
}

pub async fn read(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> ApiResult<Schedule> {
    let schedule = state
        .schedules
        .read_schedule(id, principal.organization_id)
        .await?;
    Ok(Json(schedule))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .schedules
        .delete_schedule(id, principal.organization_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_shift(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(data): Json<ScheduledShiftCreate>,
) -> ApiResult<ScheduledShift> {
    let start = parse_time_of_day(&data.start)?;
    let end = parse_time_of_day(&data.end)?;
    let template = state
        .schedules
        .add_scheduled_shift(
            id,
            principal.organization_id,
            data.day,
            start,
            end,
            &data.employee_ids,
        )
        .await?;
    Ok(Json(template))
}

pub async fn remove_shift(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((id, shift_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state
        .schedules
        .delete_scheduled_shift(id, shift_id, principal.organization_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
