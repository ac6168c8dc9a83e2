//! Utilities
//!
//! - [`time`] - quantization, ISO-8601 parsing, storage conversions
//! - [`validation`] - text length limits for incoming payloads
//! - [`logger`] - tracing subscriber setup

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::{AppError, AppResult};
