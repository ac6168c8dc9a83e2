//! Unified error codes for the shift planner
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Organization errors
//! - 4xxx: Schedule errors
//! - 5xxx: Shift errors
//! - 6xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as `u16` on the wire so API clients in any language can
/// switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Timestamp could not be parsed
    InvalidTimestamp = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// No credential, or the credential matches nothing
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token is invalid or revoked
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 3xxx: Organization ====================
    /// Organization not found
    OrganizationNotFound = 3002,
    /// Organization short key already taken
    ShortKeyExists = 3003,

    // ==================== 4xxx: Schedule ====================
    /// Schedule not found
    ScheduleNotFound = 4001,
    /// Scheduled shift (template) not found
    ScheduledShiftNotFound = 4002,
    /// Template start and end time are equal
    ScheduledShiftEmpty = 4003,

    // ==================== 5xxx: Shift ====================
    /// Shift not found
    ShiftNotFound = 5001,
    /// Shift end is not after its start
    ShiftInvalidRange = 5002,
    /// Shift is longer than the allowed maximum
    ShiftDurationExceeded = 5003,
    /// Check-in not found
    CheckInNotFound = 5101,

    // ==================== 6xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 6001,
    /// Employee email already used within the organization
    EmployeeEmailExists = 6002,
    /// Manager username already taken
    ManagerUsernameExists = 6101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidTimestamp => "Invalid timestamp",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",

            // Organization
            ErrorCode::OrganizationNotFound => "Organization not found",
            ErrorCode::ShortKeyExists => "Organization short key already exists",

            // Schedule
            ErrorCode::ScheduleNotFound => "Schedule not found",
            ErrorCode::ScheduledShiftNotFound => "Scheduled shift not found",
            ErrorCode::ScheduledShiftEmpty => "Scheduled shift start and end are equal",

            // Shift
            ErrorCode::ShiftNotFound => "Shift not found",
            ErrorCode::ShiftInvalidRange => "Shift end must be after start",
            ErrorCode::ShiftDurationExceeded => "Shift exceeds the maximum duration",
            ErrorCode::CheckInNotFound => "Check-in not found",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already exists",
            ErrorCode::ManagerUsernameExists => "Manager username already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidTimestamp),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),

            // Organization
            3002 => Ok(ErrorCode::OrganizationNotFound),
            3003 => Ok(ErrorCode::ShortKeyExists),

            // Schedule
            4001 => Ok(ErrorCode::ScheduleNotFound),
            4002 => Ok(ErrorCode::ScheduledShiftNotFound),
            4003 => Ok(ErrorCode::ScheduledShiftEmpty),

            // Shift
            5001 => Ok(ErrorCode::ShiftNotFound),
            5002 => Ok(ErrorCode::ShiftInvalidRange),
            5003 => Ok(ErrorCode::ShiftDurationExceeded),
            5101 => Ok(ErrorCode::CheckInNotFound),

            // Employee
            6001 => Ok(ErrorCode::EmployeeNotFound),
            6002 => Ok(ErrorCode::EmployeeEmailExists),
            6101 => Ok(ErrorCode::ManagerUsernameExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::RoleRequired.code(), 2002);
        assert_eq!(ErrorCode::OrganizationNotFound.code(), 3002);
        assert_eq!(ErrorCode::ScheduleNotFound.code(), 4001);
        assert_eq!(ErrorCode::ShiftNotFound.code(), 5001);
        assert_eq!(ErrorCode::ShiftDurationExceeded.code(), 5003);
        assert_eq!(ErrorCode::EmployeeEmailExists.code(), 6002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_matches_code() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::InvalidTimestamp,
            ErrorCode::TokenInvalid,
            ErrorCode::PermissionDenied,
            ErrorCode::ShortKeyExists,
            ErrorCode::ScheduledShiftEmpty,
            ErrorCode::CheckInNotFound,
            ErrorCode::ManagerUsernameExists,
            ErrorCode::ConfigError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::ShiftNotFound).unwrap();
        assert_eq!(json, "5001");

        let code: ErrorCode = serde_json::from_str("4002").unwrap();
        assert_eq!(code, ErrorCode::ScheduledShiftNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::ShiftNotFound), "5001");
        assert_eq!(ErrorCode::ShiftNotFound.message(), "Shift not found");
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }
}
