//! Shift handlers
//!
//! Listing and reading are open to any principal of the organization;
//! devices (API key) check employees in and open ad-hoc shifts.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Serialize;
use shared::models::{
    CheckIn, CheckInRequest, LimitedShiftCreate, OngoingShift, Shift, ShiftCreate,
    ShiftOutsideScheduleCreate, ShiftQuery, ShiftUpdate,
};
use shared::{AppError, ErrorCode};

use super::ApiResult;
use crate::auth::Principal;
use crate::services::ShiftChanges;
use crate::state::AppState;
use crate::utils::time::{parse_date, parse_timestamp};

#[derive(Debug, Serialize)]
pub struct OngoingShifts {
    pub shifts: Vec<OngoingShift>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ShiftQuery>,
) -> ApiResult<Vec<Shift>> {
    let org = principal.organization_id;
    let shifts = match (query.date, query.from, query.to) {
        (Some(date), None, None) => state.shifts.list_for_day(org, parse_date(&date)?).await?,
        (None, Some(from), Some(to)) => {
            let window = (parse_timestamp(&from)?, parse_timestamp(&to)?);
            state.shifts.list_by_organization(org, Some(window)).await?
        }
        (None, None, None) => state.shifts.list_by_organization(org, None).await?,
        _ => {
            return Err(AppError::validation(
                "Use either `date`, or both `from` and `to`",
            ));
        }
    };
    Ok(Json(shifts))
}

pub async fn read(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> ApiResult<Shift> {
    let shift = state.shifts.read(id, principal.organization_id).await?;
    Ok(Json(shift))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(data): Json<ShiftCreate>,
) -> ApiResult<Shift> {
    let start = parse_timestamp(&data.start)?;
    let end = parse_timestamp(&data.end)?;
    let shift = state
        .shifts
        .create_shift(
            principal.organization_id,
            &data.employee_ids,
            start,
            end,
            data.schedule_id,
        )
        .await?;
    Ok(Json(shift))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(data): Json<ShiftUpdate>,
) -> ApiResult<Shift> {
    let changes = ShiftChanges {
        employee_ids: &data.employee_ids,
        check_in_ids: &data.check_in_ids,
        start: &data.start,
        end: &data.end,
    };
    let shift = state
        .shifts
        .update(id, principal.organization_id, changes)
        .await?;
    Ok(Json(shift))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.shifts.delete(id, principal.organization_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_limited(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(data): Json<LimitedShiftCreate>,
) -> ApiResult<Shift> {
    let start = parse_timestamp(&data.start)?;
    let end = parse_timestamp(&data.end)?;
    let shift = state
        .shifts
        .create_limited_shift(
            principal.organization_id,
            &data.employee_ids,
            start,
            end,
            state.max_shift_minutes,
        )
        .await?;
    Ok(Json(shift))
}

pub async fn ongoing(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<OngoingShifts> {
    let shifts = state
        .shifts
        .ongoing_view(principal.organization_id, Utc::now())
        .await?;
    Ok(Json(OngoingShifts { shifts }))
}

pub async fn check_in(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(data): Json<CheckInRequest>,
) -> ApiResult<CheckIn> {
    state
        .check_ins
        .check_in(id, data.employee_id, principal.organization_id, Utc::now())
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidRequest,
                "Could not check in the employee",
            )
            .with_detail("shift_id", id)
            .with_detail("employee_id", data.employee_id)
        })
}

pub async fn create_outside_schedule(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(data): Json<ShiftOutsideScheduleCreate>,
) -> ApiResult<Shift> {
    let shift = state
        .shifts
        .create_outside_schedule(
            principal.organization_id,
            &data.employee_ids,
            data.open_minutes,
            Utc::now(),
        )
        .await?;
    Ok(Json(shift))
}
