//! Scan Model

use serde::{Deserialize, Serialize};

/// QR scan record (扫码记录), one row per guest landing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Scan {
    pub id: i64,
    pub qr_code_id: i64,
    pub session_id: String,
    pub scanned_at: i64,
}

/// Per-table scan tally used by the analytics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TableScanCount {
    pub table_id: i64,
    pub table_number: String,
    pub scan_count: i64,
}

/// Scan analytics over a trailing window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanAnalytics {
    pub window_days: i64,
    pub scan_count: i64,
    pub unique_sessions: i64,
    pub tables: Vec<TableScanCount>,
}
