//! Role-gated route middleware
//!
//! Extracts the credential from `Authorization: Bearer <credential>`, resolves
//! it through the [`AccessGate`](super::AccessGate) and injects the
//! [`Principal`](super::Principal) into request extensions.
//!
//! | Error | HTTP status |
//! |-------|-------------|
//! | No Authorization header | 401 NotAuthenticated |
//! | Malformed header | 401 TokenInvalid |
//! | Unknown credential | 401 NotAuthenticated |
//! | Principal of the wrong kind | 403 RoleRequired |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;

use super::{RequiredRole, extract_credential};
use crate::security_log;
use crate::state::AppState;

/// Middleware state: application state plus the role the routes require
#[derive(Clone)]
pub struct RoleGate {
    pub state: AppState,
    pub required: RequiredRole,
}

impl RoleGate {
    pub fn new(state: AppState, required: RequiredRole) -> Self {
        Self { state, required }
    }
}

pub async fn require_role(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().path().to_string());
            return Err(AppError::unauthorized());
        }
    };

    let credential = extract_credential(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let principal = gate.state.gate.authorize(credential, gate.required).await?;
    tracing::debug!(
        organization_id = principal.organization_id,
        required = gate.required.name(),
        "Request authorized"
    );

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
