//! Data models
//!
//! Shared between shift-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod employee;
pub mod manager;
pub mod organization;
pub mod role;
pub mod schedule;
pub mod shift;

// Re-exports
pub use employee::*;
pub use manager::*;
pub use organization::*;
pub use role::*;
pub use schedule::*;
pub use shift::*;
