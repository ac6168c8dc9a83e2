//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found (also used for resources of another organization)
            Self::NotFound
            | Self::OrganizationNotFound
            | Self::ScheduleNotFound
            | Self::ScheduledShiftNotFound
            | Self::ShiftNotFound
            | Self::CheckInNotFound
            | Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::ShortKeyExists
            | Self::EmployeeEmailExists
            | Self::ManagerUsernameExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired => StatusCode::FORBIDDEN,

            // 422 business-rule rejection
            Self::ShiftDurationExceeded => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation and malformed input)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
