//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 商户注册和登录
//! - [`restaurants`] - 餐厅管理接口
//! - [`menus`] - 菜单管理接口
//! - [`menu_items`] - 菜品管理接口
//! - [`tables`] - 桌台管理接口
//! - [`orders`] - 订单管理接口
//! - [`public`] - 顾客扫码端 (无需认证)

pub mod auth;
pub mod health;

// Management API (owner JWT required)
pub mod menu_items;
pub mod menus;
pub mod orders;
pub mod restaurants;
pub mod tables;

// Diner-facing API
pub mod public;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::owner_auth_middleware;
use crate::core::ServerState;

/// Create the combined router
pub fn create_router(state: ServerState) -> Router {
    // Owner management API (JWT authenticated)
    let protected = Router::new()
        .merge(restaurants::router())
        .merge(menus::router())
        .merge(menu_items::router())
        .merge(tables::router())
        .merge(orders::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            owner_auth_middleware,
        ));

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(public::router())
        .merge(protected)
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
