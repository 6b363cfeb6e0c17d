//! Table Model

use serde::{Deserialize, Serialize};

use super::qr_code::QrCode;

/// Table status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "AVAILABLE",
            TableStatus::Occupied => "OCCUPIED",
            TableStatus::Reserved => "RESERVED",
            TableStatus::Maintenance => "MAINTENANCE",
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TableStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(TableStatus::Available),
            "OCCUPIED" => Ok(TableStatus::Occupied),
            "RESERVED" => Ok(TableStatus::Reserved),
            "MAINTENANCE" => Ok(TableStatus::Maintenance),
            _ => Err(()),
        }
    }
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Table {
    pub id: i64,
    pub restaurant_id: i64,
    pub table_number: String,
    pub zone: String,
    pub capacity: i32,
    pub status: TableStatus,
    /// Last time the table entered OCCUPIED (Unix millis), kept after it frees up
    pub last_occupied: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCreate {
    pub restaurant_id: i64,
    pub table_number: String,
    pub zone: Option<String>,
    pub capacity: Option<i32>,
}

/// Update table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableUpdate {
    pub table_number: Option<String>,
    pub zone: Option<String>,
    pub capacity: Option<i32>,
}

/// Status transition payload, raw string so bad values map to a clean error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: String,
}

/// Table with its QR code attached, for dashboard listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableWithQr {
    pub table: Table,
    pub qr_code: Option<QrCode>,
}
