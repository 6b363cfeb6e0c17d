//! Dining Table API Handlers

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    QrCode, Table, TableCreate, TableStatus, TableStatusUpdate, TableUpdate, TableWithQr,
};

use crate::auth::OwnerIdentity;
use crate::core::ServerState;
use crate::db::repository::{RepoError, qr_code, restaurant, table};
use crate::qr;

#[derive(Deserialize)]
pub struct TableListQuery {
    pub restaurant_id: i64,
}

/// GET /api/tables?restaurant_id= - 获取餐厅的所有桌台 (附带各自的二维码记录)
pub async fn list(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Query(query): Query<TableListQuery>,
) -> AppResult<Json<Vec<TableWithQr>>> {
    restaurant::find_owned(&state.pool, query.restaurant_id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let rows = table::list_by_restaurant(&state.pool, query.restaurant_id).await?;
    let codes = qr_code::list_by_restaurant(&state.pool, query.restaurant_id).await?;
    let mut by_table: HashMap<i64, QrCode> = codes.into_iter().map(|c| (c.table_id, c)).collect();

    let joined = rows
        .into_iter()
        .map(|t| {
            let code = by_table.remove(&t.id);
            TableWithQr {
                table: t,
                qr_code: code,
            }
        })
        .collect();
    Ok(Json(joined))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Json(payload): Json<TableCreate>,
) -> AppResult<Json<Table>> {
    if payload.table_number.trim().is_empty() {
        return Err(AppError::validation("Table number is required"));
    }
    if let Some(capacity) = payload.capacity
        && capacity <= 0
    {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, "Capacity must be positive")
                .with_detail("capacity", capacity),
        );
    }
    restaurant::find_owned(&state.pool, payload.restaurant_id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let number = payload.table_number.clone();
    match table::create(&state.pool, payload).await {
        Ok(created) => {
            tracing::info!(table_id = created.id, "Table created");
            Ok(Json(created))
        }
        Err(RepoError::Duplicate(_)) => Err(AppError::new(ErrorCode::TableNumberExists)
            .with_detail("table_number", number)),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/tables/:id - 获取单个桌台 (附带二维码记录)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<TableWithQr>> {
    let found = table::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    let code = qr::service::find_qr_code(&state.pool, found.id).await?;

    Ok(Json(TableWithQr {
        table: found,
        qr_code: code,
    }))
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<TableUpdate>,
) -> AppResult<Json<Table>> {
    match table::update(&state.pool, id, identity.owner_id, payload).await {
        Ok(updated) => Ok(Json(updated)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::TableNotFound)),
        Err(RepoError::Duplicate(_)) => Err(AppError::new(ErrorCode::TableNumberExists)),
        Err(e) => Err(e.into()),
    }
}

/// PATCH /api/tables/:id/status - 切换桌台状态
///
/// 状态以字符串提交, 非法值返回 400 而不是反序列化错误。
pub async fn set_status(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<TableStatusUpdate>,
) -> AppResult<Json<Table>> {
    let status: TableStatus = payload.status.parse().map_err(|_| {
        AppError::new(ErrorCode::InvalidTableStatus).with_detail("status", payload.status.clone())
    })?;

    match table::set_status(&state.pool, id, identity.owner_id, status).await {
        Ok(updated) => Ok(Json(updated)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::TableNotFound)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/tables/:id - 删除桌台 (级联扫码记录/二维码/订单)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    match table::delete_cascade(&state.pool, id, identity.owner_id).await {
        Ok(summary) => {
            tracing::info!(
                table_id = id,
                scans = summary.scans,
                qr_codes = summary.qr_codes,
                order_items = summary.order_items,
                orders = summary.orders,
                "Table deleted with cascade"
            );
            Ok(Json(true))
        }
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::TableNotFound)),
        Err(e) => Err(e.into()),
    }
}

/// POST /api/tables/:id/qr - 生成二维码 (幂等)
pub async fn create_qr(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<QrCode>> {
    let owned = table::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    let code = qr::service::ensure_qr_code(&state.pool, &state.config.public_base_url, &owned).await?;
    Ok(Json(code))
}

/// GET /api/tables/:id/qr - 获取二维码
pub async fn get_qr(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<QrCode>> {
    table::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    qr::service::find_qr_code(&state.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::QrCodeNotFound))
}

/// DELETE /api/tables/:id/qr - 删除二维码 (幂等, 不存在也算成功)
pub async fn delete_qr(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    table::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    let removed = qr_code::delete_by_table(&state.pool, id).await?;
    if removed {
        tracing::info!(table_id = id, "QR code deleted");
    }
    Ok(Json(removed))
}
