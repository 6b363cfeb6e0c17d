//! Scan Repository
//!
//! Every public QR resolution appends a scan row. Analytics aggregates the
//! trailing window per restaurant: totals, distinct sessions, busiest tables.

use super::{RepoError, RepoResult};
use shared::models::{Scan, TableScanCount};
use sqlx::SqlitePool;

pub async fn record(pool: &SqlitePool, qr_code_id: i64, session_id: &str) -> RepoResult<Scan> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO scans (id, qr_code_id, session_id, scanned_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(qr_code_id)
        .bind(session_id)
        .bind(now)
        .execute(pool)
        .await?;
    let row = sqlx::query_as::<_, Scan>(
        "SELECT id, qr_code_id, session_id, scanned_at FROM scans WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| RepoError::Database("Failed to record scan".into()))
}

/// Total scans and distinct sessions for a restaurant since the cutoff.
pub async fn totals_since(
    pool: &SqlitePool,
    restaurant_id: i64,
    since_millis: i64,
) -> RepoResult<(i64, i64)> {
    let row: (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(DISTINCT s.session_id) FROM scans s JOIN qr_codes q ON s.qr_code_id = q.id WHERE q.restaurant_id = ? AND s.scanned_at >= ?",
    )
    .bind(restaurant_id)
    .bind(since_millis)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Ten busiest tables in the window, most scanned first.
pub async fn top_tables_since(
    pool: &SqlitePool,
    restaurant_id: i64,
    since_millis: i64,
) -> RepoResult<Vec<TableScanCount>> {
    let rows = sqlx::query_as::<_, TableScanCount>(
        "SELECT q.table_id, t.table_number, COUNT(*) AS scan_count FROM scans s JOIN qr_codes q ON s.qr_code_id = q.id JOIN dining_tables t ON q.table_id = t.id WHERE q.restaurant_id = ? AND s.scanned_at >= ? GROUP BY q.table_id, t.table_number ORDER BY scan_count DESC, t.table_number LIMIT 10",
    )
    .bind(restaurant_id)
    .bind(since_millis)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
