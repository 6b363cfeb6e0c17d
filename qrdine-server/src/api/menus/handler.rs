//! Menu API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Menu, MenuCreate, MenuUpdate};

use crate::auth::OwnerIdentity;
use crate::core::ServerState;
use crate::db::repository::{RepoError, menu, restaurant};

#[derive(Deserialize)]
pub struct MenuListQuery {
    pub restaurant_id: i64,
}

/// GET /api/menus?restaurant_id= - 获取餐厅的所有菜单
pub async fn list(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Query(query): Query<MenuListQuery>,
) -> AppResult<Json<Vec<Menu>>> {
    restaurant::find_owned(&state.pool, query.restaurant_id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let rows = menu::list_by_restaurant(&state.pool, query.restaurant_id).await?;
    Ok(Json(rows))
}

/// POST /api/menus - 创建菜单
pub async fn create(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Json(payload): Json<MenuCreate>,
) -> AppResult<Json<Menu>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Menu name is required"));
    }
    restaurant::find_owned(&state.pool, payload.restaurant_id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let created = menu::create(&state.pool, payload).await?;
    tracing::info!(menu_id = created.id, "Menu created");
    Ok(Json(created))
}

/// GET /api/menus/:id - 获取单个菜单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<Menu>> {
    menu::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))
}

/// PUT /api/menus/:id - 更新菜单
pub async fn update(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    match menu::update(&state.pool, id, identity.owner_id, payload).await {
        Ok(updated) => Ok(Json(updated)),
        Err(RepoError::NotFound(_)) => Err(AppError::new(ErrorCode::MenuNotFound)),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/menus/:id - 删除菜单
///
/// 菜单下仍有菜品时拒绝删除。
pub async fn delete(
    State(state): State<ServerState>,
    Extension(identity): Extension<OwnerIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    menu::find_owned(&state.pool, id, identity.owner_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))?;

    let items = menu::item_count(&state.pool, id).await?;
    if items > 0 {
        return Err(AppError::new(ErrorCode::MenuHasItems).with_detail("item_count", items));
    }

    menu::delete(&state.pool, id, identity.owner_id).await?;
    tracing::info!(menu_id = id, "Menu deleted");
    Ok(Json(true))
}
