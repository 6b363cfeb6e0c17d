//! QR Code Model

use serde::{Deserialize, Serialize};

/// Table QR code record (桌台二维码), one per table
///
/// `image_data` is a base64 PNG data URL rendered on demand; the stored
/// row keeps the copy from the last mint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct QrCode {
    pub id: i64,
    pub restaurant_id: i64,
    pub table_id: i64,
    pub unique_code: String,
    pub target_url: String,
    pub image_data: String,
    pub created_at: i64,
}
