//! Public "is open" endpoint

use axum::Json;
use axum::extract::{Path, State};
use shared::models::OpenStatus;

use super::ApiResult;
use crate::state::AppState;

pub async fn is_open(
    State(state): State<AppState>,
    Path(short_key): Path<String>,
) -> ApiResult<OpenStatus> {
    let open = state.shifts.is_open(&short_key, chrono::Utc::now()).await?;
    Ok(Json(OpenStatus { open }))
}
