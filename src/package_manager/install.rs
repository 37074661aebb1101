//! 安装调度：把选中的结果映射为安装命令并同步执行

use super::types::{InstallOutcome, SearchResult, Source};
use super::PackageManager;
use anyhow::Result;
use chrono::Local;
use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("'{0}' is not a valid package name")]
    InvalidPackageName(String),
    #[error("could not hand the terminal over: {0}")]
    Console(String),
    #[error("could not start {0}")]
    Spawn(String),
}

/// 执行外部命令并观察退出状态
pub trait CommandRunner {
    /// 子进程继承终端；返回是否以 0 退出
    fn run(&self, program: &str, args: &[String]) -> io::Result<bool>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DuctRunner;

impl CommandRunner for DuctRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<bool> {
        let output = duct::cmd(program, args).unchecked().run()?;
        Ok(output.status.success())
    }
}

/// 终端交接：子进程运行期间必须处于普通（非 raw）模式
pub trait ConsoleHandoff {
    fn release(&mut self) -> Result<()>;
    fn reacquire(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// 包名只允许 pacman 接受的字符，外加 `repo/name` 中的 '/'
fn is_valid_target(target: &str) -> bool {
    !target.is_empty()
        && !target.starts_with('-')
        && target
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '+' | '-' | '/'))
}

impl PackageManager {
    /// 按来源选择安装命令模板
    pub fn install_command(&self, result: &SearchResult) -> Result<InstallCommand, InstallError> {
        let target = result.install_target();
        if !is_valid_target(target) {
            return Err(InstallError::InvalidPackageName(target.to_string()));
        }

        let command = match result.source() {
            Source::Remote => {
                // AUR helper 自行提权，不能在 sudo 下运行
                let mut args = vec!["-S".to_string()];
                if self.noconfirm {
                    args.push("--noconfirm".to_string());
                }
                args.push(target.to_string());
                InstallCommand {
                    program: self.aur_helper.clone(),
                    args,
                }
            }
            Source::Local => match &self.elevate {
                Some(elevate) => InstallCommand {
                    program: elevate.clone(),
                    args: vec![self.native.clone(), "-S".to_string(), target.to_string()],
                },
                None => InstallCommand {
                    program: self.native.clone(),
                    args: vec!["-S".to_string(), target.to_string()],
                },
            },
        };
        Ok(command)
    }
}

pub struct Installer<C = DuctRunner> {
    manager: PackageManager,
    runner: C,
}

impl Installer<DuctRunner> {
    pub fn new(manager: PackageManager) -> Self {
        Self::with_runner(manager, DuctRunner)
    }
}

impl<C: CommandRunner> Installer<C> {
    pub fn with_runner(manager: PackageManager, runner: C) -> Self {
        Self { manager, runner }
    }

    /// 安装选中的包，不重试。
    ///
    /// 子进程运行前释放终端、结束后重新获取；释放失败则不启动子进程。
    pub fn install(&self, result: &SearchResult, console: &mut impl ConsoleHandoff) -> InstallOutcome {
        let target = result.install_target().to_string();
        let finish = |success: bool, error: Option<InstallError>| InstallOutcome {
            package_name: target.clone(),
            source: result.source(),
            success,
            error: error.map(|e| e.to_string()),
            finished_at: Local::now(),
        };

        let command = match self.manager.install_command(result) {
            Ok(command) => command,
            Err(e) => {
                log::warn!("拒绝安装: {}", e);
                return finish(false, Some(e));
            }
        };

        if let Err(e) = console.release() {
            log::error!("释放终端失败，取消安装: {:#}", e);
            return finish(false, Some(InstallError::Console(e.to_string())));
        }

        log::info!("执行安装: {}", command);
        println!("Installing: {}...", target);

        let outcome = match self.runner.run(&command.program, &command.args) {
            Ok(true) => finish(true, None),
            Ok(false) => {
                log::warn!("{} 以非零状态退出", command);
                finish(false, None)
            }
            Err(e) => {
                log::warn!("无法启动 {}: {}", command.program, e);
                finish(false, Some(InstallError::Spawn(command.program.clone())))
            }
        };
        println!();
        println!("{}", outcome.status_line());

        if let Err(e) = console.reacquire() {
            log::error!("重新进入 TUI 失败: {:#}", e);
        }
        outcome
    }
}
