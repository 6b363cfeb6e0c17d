//! Public API Handlers
//!
//! 扫码解析和下单。响应里只暴露顾客需要的字段, owner_id 等
//! 内部信息一律不出门。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Menu, MenuItem, OrderCreate, OrderWithItems, QrCode, Restaurant, Table};
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::{RepoError, menu, menu_item, order, qr_code, restaurant, scan, table};

#[derive(Deserialize)]
pub struct SessionQuery {
    /// 同一顾客刷新页面时带回, 去重统计用
    pub session: Option<String>,
}

/// Restaurant fields safe to show a diner.
#[derive(Debug, Serialize)]
pub struct PublicRestaurant {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub contact_info: Option<String>,
}

impl From<Restaurant> for PublicRestaurant {
    fn from(value: Restaurant) -> Self {
        Self {
            id: value.id,
            name: value.name,
            location: value.location,
            contact_info: value.contact_info,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicTable {
    pub id: i64,
    pub table_number: String,
    pub zone: String,
}

impl From<Table> for PublicTable {
    fn from(value: Table) -> Self {
        Self {
            id: value.id,
            table_number: value.table_number,
            zone: value.zone,
        }
    }
}

/// 菜单和它的可售菜品
#[derive(Debug, Serialize)]
pub struct PublicMenu {
    pub menu: Menu,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Serialize)]
pub struct TableResolution {
    pub session_id: String,
    pub restaurant: PublicRestaurant,
    pub table: PublicTable,
    pub menus: Vec<PublicMenu>,
    /// 本桌还未出餐的订单, 回头客刷新页面时能看到已点内容
    pub pending_orders: Vec<OrderWithItems>,
}

/// GET /api/public/table/:code - 解析扫码, 记录一次扫描并返回菜单
///
/// code 是二维码的 unique_code。每次成功解析都会写一条 scan 记录;
/// 没带 session 参数时生成一个新的会话 ID, 前端应在后续请求里带回。
pub async fn resolve_table(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Query(query): Query<SessionQuery>,
) -> AppResult<Json<TableResolution>> {
    let (qr, dining_table, found_restaurant) = resolve_code(&state, &code).await?;

    let active_menus = menu::list_active_by_restaurant(&state.pool, found_restaurant.id).await?;
    let mut menus = Vec::with_capacity(active_menus.len());
    for m in active_menus {
        let items = menu_item::list_available_by_menu(&state.pool, m.id).await?;
        menus.push(PublicMenu { menu: m, items });
    }

    let pending_orders = order::pending_by_table(&state.pool, dining_table.id).await?;

    let session_id = query
        .session
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    scan::record(&state.pool, qr.id, &session_id).await?;
    tracing::info!(
        qr_code_id = qr.id,
        table_id = dining_table.id,
        "QR code scanned"
    );

    Ok(Json(TableResolution {
        session_id,
        restaurant: found_restaurant.into(),
        table: dining_table.into(),
        menus,
        pending_orders,
    }))
}

/// POST /api/public/table/:code/orders - 顾客下单
///
/// 单价在这里落库定格, 之后商户改价不影响已下的单。
pub async fn place_order(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderWithItems>> {
    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for line in &payload.items {
        if line.quantity < 1 {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "Quantity must be at least 1",
            )
            .with_detail("menu_item_id", line.menu_item_id));
        }
    }

    let (qr, dining_table, _) = resolve_code(&state, &code).await?;

    match order::create_with_items(&state.pool, qr.restaurant_id, qr.table_id, payload).await {
        Ok(created) => {
            tracing::info!(
                order_id = created.order.id,
                table_id = dining_table.id,
                total = created.order.total,
                "Order placed"
            );
            Ok(Json(created))
        }
        // 下单与下架并发时, 整单拒绝而不是静默丢行
        Err(RepoError::NotFound(msg)) => {
            Err(AppError::with_message(ErrorCode::MenuItemNotFound, msg))
        }
        Err(e) => Err(e.into()),
    }
}

/// 从 unique_code 还原出二维码、桌台和餐厅。
///
/// 桌台删除走级联, 所以正常情况下 QR 在则桌台必在; 仍按缺行处理
/// 而不是 panic。
async fn resolve_code(
    state: &ServerState,
    code: &str,
) -> Result<(QrCode, Table, Restaurant), AppError> {
    let qr = qr_code::find_by_unique_code(&state.pool, code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::QrCodeNotFound))?;
    let dining_table = table::find_by_id(&state.pool, qr.table_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    let found_restaurant = restaurant::find_by_id(&state.pool, qr.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    Ok((qr, dining_table, found_restaurant))
}
