//! Shared types for the shift planner
//!
//! Domain models and the unified error system used by `shift-server`
//! and by API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
