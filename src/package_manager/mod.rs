//! 包管理器模块：对 pacman 与 AUR helper (yay / paru) 的封装

pub mod aggregate;
pub mod extract;
pub mod install;
pub mod local;
pub mod query;
pub mod remote;
pub mod types;

// 重新导出常用类型
pub use aggregate::{Aggregator, SourceOrder};
pub use install::{ConsoleHandoff, Installer};
pub use local::PacmanSearch;
pub use query::{Query, QueryError};
pub use remote::AurClient;
pub use types::{InstallOutcome, ResultSet, SearchResult, Source, MAX_RESULTS};

use crate::config::Config;
use std::process::Command;

const AUR_HELPERS: [&str; 2] = ["yay", "paru"];

/// 安装时使用的程序组合
#[derive(Debug, Clone)]
pub struct PackageManager {
    native: String,
    aur_helper: String,
    /// 提权前缀；以 root 运行时为 None
    elevate: Option<String>,
    noconfirm: bool,
}

impl PackageManager {
    pub fn detect(config: &Config) -> Self {
        let aur_helper = config
            .aur_helper
            .clone()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(detect_aur_helper);

        let elevate = if is_root() {
            None
        } else {
            Some(config.elevate_with.clone()).filter(|e| !e.trim().is_empty())
        };

        let pm = Self {
            native: config.native_manager.clone(),
            aur_helper,
            elevate,
            noconfirm: config.noconfirm,
        };
        log::info!(
            "包管理器: native={} aur={} elevate={:?}",
            pm.native,
            pm.aur_helper,
            pm.elevate
        );
        pm
    }

    pub fn native(&self) -> &str {
        &self.native
    }
}

fn is_installed(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// 依次查找 yay / paru，都不存在时仍返回 yay（安装时再报告失败）
fn detect_aur_helper() -> String {
    AUR_HELPERS
        .iter()
        .find(|h| is_installed(h))
        .map(|h| h.to_string())
        .unwrap_or_else(|| {
            log::warn!("未找到 AUR helper (yay/paru)，默认使用 yay");
            AUR_HELPERS[0].to_string()
        })
}

fn is_root() -> bool {
    // SAFETY: geteuid 没有前置条件，也不会失败
    unsafe { libc::geteuid() == 0 }
}
