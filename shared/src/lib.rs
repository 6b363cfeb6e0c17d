//! Shared types for the QRDine platform
//!
//! Common types used by the server and any future clients: the unified
//! error system, API response envelope, domain models, and ID/time helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
