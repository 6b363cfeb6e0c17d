//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderStatus, OrderStatusUpdate, OrderWithItems};

use crate::auth::OwnerIdentity;
use crate::core::ServerState;
use crate::db::repository::{RepoError, order, restaurant};

#[derive(Deserialize)]
pub struct OrderListQuery {
    pub restaurant_id: i64,
    /// 只看某张桌台的订单
    pub table_id: Option<i64>,
    /// 只看某个状态, 如 PENDING
    pub status: Option<OrderStatus>,
}

/// GET /api/orders?restaurant_id= - 获取餐厅订单 (新单在前)
pub async fn list(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    restaurant::find_owned(&state.pool, query.restaurant_id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let rows = order::list_by_restaurant(
        &state.pool,
        query.restaurant_id,
        query.table_id,
        query.status,
    )
    .await?;
    Ok(Json(rows))
}

/// GET /api/orders/:id - 获取订单详情 (含明细)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderWithItems>> {
    order::find_owned_with_items(&state.pool, id, identity.owner_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// PATCH /api/orders/:id/status - 流转订单状态
pub async fn set_status(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    match order::set_status(&state.pool, id, identity.owner_id, payload.status).await {
        Ok(updated) => Ok(Json(updated)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::OrderNotFound)),
        Err(e) => Err(e.into()),
    }
}
