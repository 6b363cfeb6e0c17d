//! qrdine-server — 餐厅扫码点餐服务入口

use qrdine_server::{Config, Server, init_logger_with_file};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // 1. 加载配置
    let config = Config::from_env()?;

    // 2. 初始化日志 (生产环境输出 JSON)
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let json_format = config.environment == "production";
    init_logger_with_file(&level, json_format, config.log_dir.as_deref())?;

    tracing::info!("Starting qrdine-server (env: {})", config.environment);

    // 3. 启动 HTTP 服务器
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
