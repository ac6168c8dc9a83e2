//! Shift Server - multi-tenant workforce scheduling backend
//!
//! # Overview
//!
//! - **Identity** (`services::identity`): organizations, managers, employees, tokens
//! - **Schedules** (`services::schedule`): recurring weekly shift templates
//! - **Shifts** (`services::shift`): dated shifts, rosters, time-window queries
//! - **Check-ins** (`services::check_in`): arrival tracking per shift
//! - **Access gate** (`auth`): credential → principal resolution, role checks
//! - **HTTP API** (`api`): axum routes over the services
//!
//! ```text
//! shift-server/src/
//! ├── api/         # HTTP routes and handlers
//! ├── auth/        # access gate, middleware, password hashing
//! ├── db/          # SQLite pool + repositories
//! ├── services/    # domain operations
//! ├── utils/       # logging, time helpers, validation
//! ├── config.rs
//! └── state.rs
//! ```

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod services;
pub mod state;
pub mod utils;

pub use auth::{AccessGate, Principal, PrincipalKind, RequiredRole};
pub use config::Config;
pub use db::DbService;
pub use state::AppState;
pub use utils::{AppError, AppResult};
