//! QR Code Repository
//!
//! One QR record per table, enforced by UNIQUE(table_id). Concurrent
//! creation races surface as [`RepoError::Duplicate`]; the caller wins by
//! re-reading the surviving row.

use super::{RepoError, RepoResult};
use shared::models::QrCode;
use sqlx::SqlitePool;

const QR_SELECT: &str = "SELECT id, restaurant_id, table_id, unique_code, target_url, image_data, created_at FROM qr_codes";

pub async fn insert(
    pool: &SqlitePool,
    restaurant_id: i64,
    table_id: i64,
    unique_code: &str,
    target_url: &str,
    image_data: &str,
) -> RepoResult<QrCode> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO qr_codes (id, restaurant_id, table_id, unique_code, target_url, image_data, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(table_id)
    .bind(unique_code)
    .bind(target_url)
    .bind(image_data)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_table(pool, table_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create QR code".into()))
}

pub async fn find_by_table(pool: &SqlitePool, table_id: i64) -> RepoResult<Option<QrCode>> {
    let sql = format!("{QR_SELECT} WHERE table_id = ?");
    let row = sqlx::query_as::<_, QrCode>(&sql)
        .bind(table_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Resolve a scanned code to its record. Public entry point, no owner scope.
pub async fn find_by_unique_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<QrCode>> {
    let sql = format!("{QR_SELECT} WHERE unique_code = ?");
    let row = sqlx::query_as::<_, QrCode>(&sql)
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<QrCode>> {
    let sql = format!("{QR_SELECT} WHERE restaurant_id = ? ORDER BY created_at");
    let rows = sqlx::query_as::<_, QrCode>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Remove a table's QR code and its scan history. Returns `false` when the
/// table had no code, which callers treat as success.
pub async fn delete_by_table(pool: &SqlitePool, table_id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "DELETE FROM scans WHERE qr_code_id IN (SELECT id FROM qr_codes WHERE table_id = ?)",
    )
    .bind(table_id)
    .execute(&mut *tx)
    .await?;
    let rows = sqlx::query("DELETE FROM qr_codes WHERE table_id = ?")
        .bind(table_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
