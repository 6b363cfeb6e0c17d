//! Unified error codes for the QRDine platform
//!
//! This module defines all error codes used across the server and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Restaurant errors
//! - 3xxx: Menu errors
//! - 4xxx: Order errors
//! - 5xxx: Table & QR code errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
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
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email is already registered
    EmailExists = 1005,

    // ==================== 2xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 2001,
    /// Restaurant still has tables
    RestaurantHasTables = 2002,

    // ==================== 3xxx: Menu ====================
    /// Menu not found
    MenuNotFound = 3001,
    /// Menu still has items
    MenuHasItems = 3002,
    /// Menu item not found
    MenuItemNotFound = 3101,
    /// Menu item is not available
    MenuItemUnavailable = 3102,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Order item not found
    OrderItemNotFound = 4003,

    // ==================== 5xxx: Table & QR ====================
    /// Table not found
    TableNotFound = 5001,
    /// Table number already exists in this restaurant
    TableNumberExists = 5002,
    /// Table status value is not recognized
    InvalidTableStatus = 5003,
    /// QR code not found
    QrCodeNotFound = 5101,
    /// QR code already exists for this table
    QrCodeExists = 5102,
    /// QR code image generation failed
    QrEncodingFailed = 5103,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Multi-step write could not complete atomically
    IntegrityError = 9004,
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
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::EmailExists => "Email is already registered",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::RestaurantHasTables => "Restaurant still has tables",

            // Menu
            ErrorCode::MenuNotFound => "Menu not found",
            ErrorCode::MenuHasItems => "Menu still has items",
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemUnavailable => "Menu item is not available",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::OrderItemNotFound => "Order item not found",

            // Table & QR
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNumberExists => "Table number already exists in this restaurant",
            ErrorCode::InvalidTableStatus => "Table status value is not recognized",
            ErrorCode::QrCodeNotFound => "QR code not found",
            ErrorCode::QrCodeExists => "QR code already exists for this table",
            ErrorCode::QrEncodingFailed => "QR code image generation failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::IntegrityError => "Write could not complete atomically",
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
            6 => Ok(ErrorCode::RequiredField),
            7 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::EmailExists),

            // Restaurant
            2001 => Ok(ErrorCode::RestaurantNotFound),
            2002 => Ok(ErrorCode::RestaurantHasTables),

            // Menu
            3001 => Ok(ErrorCode::MenuNotFound),
            3002 => Ok(ErrorCode::MenuHasItems),
            3101 => Ok(ErrorCode::MenuItemNotFound),
            3102 => Ok(ErrorCode::MenuItemUnavailable),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::OrderItemNotFound),

            // Table & QR
            5001 => Ok(ErrorCode::TableNotFound),
            5002 => Ok(ErrorCode::TableNumberExists),
            5003 => Ok(ErrorCode::InvalidTableStatus),
            5101 => Ok(ErrorCode::QrCodeNotFound),
            5102 => Ok(ErrorCode::QrCodeExists),
            5103 => Ok(ErrorCode::QrEncodingFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::IntegrityError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
