mod config;
mod package_manager;
mod tui;

use anyhow::{Context, Result};
use config::Config;
use std::fs::OpenOptions;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load_or_default()?;
    init_logging(&config)?;

    tui::run(config).await?;

    Ok(())
}

/// stderr 与 TUI 共用终端，配置了 log_file 时日志写入文件
fn init_logging(config: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("无法打开日志文件: {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
