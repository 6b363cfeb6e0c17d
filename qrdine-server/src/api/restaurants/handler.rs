//! Restaurant API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Menu, QrCode, Restaurant, RestaurantCreate, RestaurantUpdate, ScanAnalytics};

use crate::auth::OwnerIdentity;
use crate::core::ServerState;
use crate::db::repository::{RepoError, restaurant, scan};
use crate::qr;

const DEFAULT_WINDOW_DAYS: i64 = 30;
const MAX_WINDOW_DAYS: i64 = 365;

#[derive(Serialize)]
pub struct RestaurantCreated {
    pub restaurant: Restaurant,
    pub menu: Menu,
}

/// GET /api/restaurants - 获取当前商户的所有餐厅
pub async fn list(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
) -> AppResult<Json<Vec<Restaurant>>> {
    let rows = restaurant::find_all_by_owner(&state.pool, identity.owner_id).await?;
    Ok(Json(rows))
}

/// POST /api/restaurants - 创建餐厅 (自动附带默认菜单)
pub async fn create(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<RestaurantCreated>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Restaurant name is required"));
    }

    let (created, menu) = restaurant::create(&state.pool, identity.owner_id, payload).await?;
    tracing::info!(restaurant_id = created.id, "Restaurant created");

    Ok(Json(RestaurantCreated {
        restaurant: created,
        menu,
    }))
}

/// GET /api/restaurants/:id - 获取单个餐厅
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<Restaurant>> {
    restaurant::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))
}

/// PUT /api/restaurants/:id - 更新餐厅
pub async fn update(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    match restaurant::update(&state.pool, id, identity.owner_id, payload).await {
        Ok(updated) => Ok(Json(updated)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::RestaurantNotFound)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/restaurants/:id - 删除餐厅
///
/// 仍有桌台时拒绝删除; 桌台必须先逐个删除 (各自级联)。
pub async fn delete(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    restaurant::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let tables = restaurant::table_count(&state.pool, id).await?;
    if tables > 0 {
        return Err(AppError::new(ErrorCode::RestaurantHasTables).with_detail("table_count", tables));
    }

    restaurant::delete(&state.pool, id, identity.owner_id).await?;
    tracing::info!(restaurant_id = id, "Restaurant deleted");

    Ok(Json(true))
}

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<i64>,
}

/// GET /api/restaurants/:id/analytics?days=30 - 扫码统计
pub async fn analytics(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<ScanAnalytics>> {
    restaurant::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let window_days = query
        .days
        .unwrap_or(DEFAULT_WINDOW_DAYS)
        .clamp(1, MAX_WINDOW_DAYS);
    let since = shared::util::now_millis() - window_days * 24 * 60 * 60 * 1000;

    let (scan_count, unique_sessions) = scan::totals_since(&state.pool, id, since).await?;
    let tables = scan::top_tables_since(&state.pool, id, since).await?;

    Ok(Json(ScanAnalytics {
        window_days,
        scan_count,
        unique_sessions,
        tables,
    }))
}

/// POST /api/restaurants/:id/qr/regenerate - 为所有桌台补发二维码
pub async fn regenerate_qr(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<QrCode>>> {
    restaurant::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let codes =
        qr::service::regenerate_for_restaurant(&state.pool, &state.config.public_base_url, id)
            .await?;
    tracing::info!(restaurant_id = id, count = codes.len(), "QR codes regenerated");

    Ok(Json(codes))
}
