//! Server state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// 服务器状态 - 共享配置与数据库连接池
///
/// Arc 浅拷贝, 每个请求克隆的成本可忽略。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Arc<Config>,
    /// SQLite 连接池
    pub pool: SqlitePool,
}

impl ServerState {
    /// Open the database, run migrations and build the shared state.
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.db_path)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self {
            config: Arc::new(config.clone()),
            pool: db.pool,
        })
    }
}
