use pearl_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 日志
    init_logger();

    print_banner();

    tracing::info!("Pearl server starting...");

    // 3. 加载配置
    let config = Config::from_env();

    // 4. 初始化状态（数据库 + 服务）
    let state = ServerState::initialize(&config).await?;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
