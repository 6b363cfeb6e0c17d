//! QR Code Lifecycle
//!
//! One stable record per table. The stored row never changes after the
//! first write; the image is re-rendered from the stored target URL on
//! every read so the served PNG never depends on blob freshness.

use super::generator;
use crate::db::repository::{RepoError, qr_code, table};
use shared::error::AppError;
use shared::models::{QrCode, Table};
use sqlx::SqlitePool;

fn with_fresh_image(mut qr: QrCode) -> Result<QrCode, AppError> {
    qr.image_data = generator::render_data_url(&qr.target_url)?;
    Ok(qr)
}

/// Look up a table's QR record without creating one.
pub async fn find_qr_code(pool: &SqlitePool, table_id: i64) -> Result<Option<QrCode>, AppError> {
    match qr_code::find_by_table(pool, table_id).await? {
        Some(qr) => Ok(Some(with_fresh_image(qr)?)),
        None => Ok(None),
    }
}

/// Return the table's QR record, creating it on first use.
pub async fn ensure_qr_code(
    pool: &SqlitePool,
    base_url: &str,
    table: &Table,
) -> Result<QrCode, AppError> {
    if let Some(existing) = find_qr_code(pool, table.id).await? {
        return Ok(existing);
    }

    let unique_code = table.id.to_string();
    let url = generator::target_url(base_url, table.id);
    let image = generator::render_data_url(&url)?;

    match qr_code::insert(pool, table.restaurant_id, table.id, &unique_code, &url, &image).await {
        Ok(created) => Ok(created),
        // Lost a concurrent first-use race; the stored row wins
        Err(RepoError::Duplicate(_)) => find_qr_code(pool, table.id)
            .await?
            .ok_or_else(|| AppError::database("QR code vanished during create")),
        Err(e) => Err(e.into()),
    }
}

/// Issue or refresh QR codes for every table in the restaurant.
pub async fn regenerate_for_restaurant(
    pool: &SqlitePool,
    base_url: &str,
    restaurant_id: i64,
) -> Result<Vec<QrCode>, AppError> {
    let tables = table::list_by_restaurant(pool, restaurant_id).await?;
    let mut codes = Vec::with_capacity(tables.len());
    for t in &tables {
        codes.push(ensure_qr_code(pool, base_url, t).await?);
    }
    Ok(codes)
}
