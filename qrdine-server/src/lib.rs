//! QR Dine Server - 多租户餐厅点餐系统
//!
//! # 架构概述
//!
//! 商户通过认证 API 管理餐厅、菜单和桌台, 每张桌台绑定一个
//! 二维码; 顾客扫码后走公开 API 浏览菜单并下单。
//!
//! # 模块结构
//!
//! ```text
//! qrdine-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── auth/          # JWT 认证、密码哈希
//! ├── qr/            # 二维码渲染与生命周期
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # SQLite 连接与仓储
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod qr;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};
