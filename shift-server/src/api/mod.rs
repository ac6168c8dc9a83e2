//! HTTP API
//!
//! Thin handlers over the services. Each group of routes carries the
//! [`RequiredRole`] it needs; the gate runs before the handler and injects the
//! resolved [`Principal`](crate::auth::Principal).

pub mod auth;
pub mod employee;
pub mod health;
pub mod open;
pub mod organization;
pub mod schedule;
pub mod shift;

use axum::routing::{delete, get, post, put};
use axum::{Json, Router, middleware};
use shared::AppError;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{RequiredRole, RoleGate, require_role};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// In-flight request cap for the whole server
const MAX_CONCURRENT_REQUESTS: usize = 256;

fn gated(state: &AppState, required: RequiredRole, routes: Router<AppState>) -> Router<AppState> {
    routes.route_layer(middleware::from_fn_with_state(
        RoleGate::new(state.clone(), required),
        require_role,
    ))
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // No credential
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/open/{short_key}", get(open::is_open))
        .route("/api/auth/manager/login", post(auth::manager_login))
        .route("/api/auth/employee/login", post(auth::employee_login));

    // Any resolved principal
    let any = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/shifts", get(shift::list))
        .route("/api/shifts/{id}", get(shift::read));

    let manager = Router::new()
        .route(
            "/api/schedules",
            get(schedule::list).post(schedule::create),
        )
        .route(
            "/api/schedules/{id}",
            get(schedule::read).delete(schedule::remove),
        )
        .route("/api/schedules/{id}/shifts", post(schedule::add_shift))
        .route(
            "/api/schedules/{id}/shifts/{shift_id}",
            delete(schedule::remove_shift),
        )
        .route("/api/shifts", post(shift::create))
        .route("/api/shifts/{id}", put(shift::update).delete(shift::remove))
        .route(
            "/api/employees",
            get(employee::list).post(employee::create),
        )
        .route(
            "/api/employees/{id}",
            get(employee::read).delete(employee::remove),
        )
        .route("/api/employees/{id}/title", put(employee::update_title))
        .route("/api/employees/{id}/active", put(employee::update_active))
        .route("/api/employees/{id}/roles", post(employee::assign_role))
        .route("/api/employees/{id}/friends", post(employee::add_friend))
        .route("/api/managers", post(organization::create_manager))
        .route("/api/organization/api-key", post(organization::rotate_api_key));

    let employee = Router::new().route("/api/shifts/limited", post(shift::create_limited));

    // Organization API key (devices at the venue)
    let api_key = Router::new()
        .route("/api/shifts/ongoing", get(shift::ongoing))
        .route("/api/shifts/{id}/checkin", post(shift::check_in))
        .route("/api/shifts/outside-schedule", post(shift::create_outside_schedule));

    Router::new()
        .merge(public)
        .merge(gated(&state, RequiredRole::Any, any))
        .merge(gated(&state, RequiredRole::Manager, manager))
        .merge(gated(&state, RequiredRole::Employee, employee))
        .merge(gated(&state, RequiredRole::ApiKey, api_key))
        .with_state(state)
}

/// Router plus the HTTP middleware stack used by the binary
pub fn build_app(state: AppState) -> Router {
    create_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
}
