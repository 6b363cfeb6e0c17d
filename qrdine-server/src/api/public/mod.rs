//! Public API 模块
//!
//! 顾客扫码后的入口, 不经过认证中间件。路径参数是 QR code 的
//! unique_code, 不是桌台 ID, 避免顾客枚举内部主键。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/table/{code}", get(handler::resolve_table))
        .route("/table/{code}/orders", post(handler::place_order))
}
