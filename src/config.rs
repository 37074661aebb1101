use crate::package_manager::remote::AUR_RPC_URL;
use crate::package_manager::{SourceOrder, MAX_RESULTS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AUR RPC 地址（v / type / arg 参数由程序追加）
    pub registry_url: String,
    pub request_timeout_secs: u64,
    /// 本地搜索与官方仓库安装所用程序
    pub native_manager: String,
    /// 为空时自动检测 yay / paru
    pub aur_helper: Option<String>,
    pub noconfirm: bool,
    pub elevate_with: String,
    pub max_results: usize,
    pub source_order: SourceOrder,
    /// 上下移动到两端时是否循环
    pub wrap_navigation: bool,
    pub pause_after_install: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: AUR_RPC_URL.to_string(),
            request_timeout_secs: 15,
            native_manager: "pacman".to_string(),
            aur_helper: None,
            noconfirm: true,
            elevate_with: "sudo".to_string(),
            max_results: MAX_RESULTS,
            source_order: SourceOrder::LocalFirst,
            wrap_navigation: false,
            pause_after_install: true,
            log_file: None,
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config/aurseek/config.toml")
    }

    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("读取配置失败: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("配置格式错误: {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 上限限制在 1..=MAX_RESULTS
    pub fn result_cap(&self) -> usize {
        self.max_results.clamp(1, MAX_RESULTS)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
