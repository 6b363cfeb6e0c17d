//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found (absent or not owned by the caller; same answer)
            Self::NotFound
            | Self::RestaurantNotFound
            | Self::MenuNotFound
            | Self::MenuItemNotFound
            | Self::OrderNotFound
            | Self::OrderItemNotFound
            | Self::TableNotFound
            | Self::QrCodeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (uniqueness and referential guards)
            Self::AlreadyExists
            | Self::EmailExists
            | Self::RestaurantHasTables
            | Self::MenuHasItems
            | Self::TableNumberExists
            | Self::QrCodeExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::IntegrityError
            | Self::QrEncodingFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
