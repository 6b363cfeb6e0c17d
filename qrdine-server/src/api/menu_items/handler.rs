//! Menu Item API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, MenuItemAvailabilityUpdate, MenuItemCreate, MenuItemUpdate};

use crate::auth::OwnerIdentity;
use crate::core::ServerState;
use crate::db::repository::{RepoError, menu, menu_item};

#[derive(Deserialize)]
pub struct ItemListQuery {
    pub menu_id: i64,
}

/// GET /api/menu-items?menu_id= - 获取菜单的所有菜品
pub async fn list(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Query(query): Query<ItemListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    menu::find_owned(&state.pool, query.menu_id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))?;

    let rows = menu_item::list_by_menu(&state.pool, query.menu_id).await?;
    Ok(Json(rows))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Item name is required"));
    }
    if payload.base_price <= 0.0 {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, "Price must be positive")
                .with_detail("base_price", payload.base_price),
        );
    }
    menu::find_owned(&state.pool, payload.menu_id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))?;

    let created = menu_item::create(&state.pool, payload).await?;
    tracing::info!(item_id = created.id, "Menu item created");
    Ok(Json(created))
}

/// GET /api/menu-items/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    menu_item::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))
}

/// PUT /api/menu-items/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(price) = payload.base_price
        && price <= 0.0
    {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, "Price must be positive")
                .with_detail("base_price", price),
        );
    }

    match menu_item::update(&state.pool, id, identity.owner_id, payload).await {
        Ok(updated) => Ok(Json(updated)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::MenuItemNotFound)),
        Err(e) => Err(e.into()),
    }
}

/// PATCH /api/menu-items/:id/availability - 沽清/恢复 (86 switch)
pub async fn set_availability(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemAvailabilityUpdate>,
) -> AppResult<Json<MenuItem>> {
    match menu_item::set_availability(&state.pool, id, identity.owner_id, payload.is_available)
        .await
    {
        Ok(updated) => Ok(Json(updated)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::MenuItemNotFound)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/menu-items/:id - 删除菜品
///
/// 已出现在历史订单里的菜品不可删除, 只能沽清下架。
pub async fn delete(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    menu_item::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    let references = menu_item::order_reference_count(&state.pool, id).await?;
    if references > 0 {
        return Err(AppError::conflict(
            "Item appears in past orders; mark it unavailable instead",
        )
        .with_detail("order_references", references));
    }

    menu_item::delete(&state.pool, id, identity.owner_id).await?;
    tracing::info!(item_id = id, "Menu item deleted");
    Ok(Json(true))
}
