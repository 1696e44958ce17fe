use anyhow::Result;
use risinghub_auto_spin::logger;
use risinghub_auto_spin::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置，默认读取当前目录下的 config.toml
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(&config_path)?;

    // 运行主循环，只有致命错误才会返回
    App::initialize(config).run().await?;

    Ok(())
}
