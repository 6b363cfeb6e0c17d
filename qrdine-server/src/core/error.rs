//! Server infrastructure errors
//!
//! Startup and lifecycle failures only. Request-path errors are
//! [`shared::error::AppError`], which carries the API error envelope.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器启动路径的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
