//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use super::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: organization, schedule, role, person names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: organization short key, username, title
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Photo references
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Turn `validator` derive failures into a field-annotated validation error
pub fn from_validation_errors(errors: validator::ValidationErrors) -> AppError {
    let mut err = AppError::validation(errors.to_string());
    for field in errors.field_errors().keys() {
        err = err.with_detail(field.to_string(), "invalid");
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Night crew", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(None, "title", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(validate_optional_text(Some("Barista"), "title", MAX_SHORT_TEXT_LEN).is_ok());
        let long = "x".repeat(MAX_SHORT_TEXT_LEN + 1);
        assert!(validate_optional_text(Some(&long), "title", MAX_SHORT_TEXT_LEN).is_err());
    }
}
