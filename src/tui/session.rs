//! 终端会话：raw 模式 + 备用屏幕的作用域获取与释放

use crate::package_manager::ConsoleHandoff;
use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout, Write};

/// 持有期间终端处于 raw 模式；suspend/resume 可重复调用，Drop 时保证恢复
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let backend = CrosstermBackend::new(stdout);
        let mut session = Self {
            terminal: Terminal::new(backend)?,
            active: true,
        };
        session.terminal.hide_cursor()?;
        session.terminal.clear()?;
        Ok(session)
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    pub fn height(&self) -> Result<u16> {
        Ok(self.terminal.size()?.height)
    }

    /// 交出终端：关闭 raw 模式、离开备用屏幕、显示光标
    pub fn suspend(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        disable_raw_mode()?;
        self.active = false;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// 收回终端并恢复到 suspend 之前的模式
    pub fn resume(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        enable_raw_mode()?;
        self.active = true;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// 正常退出路径
    pub fn leave(mut self) -> Result<()> {
        self.suspend()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
            self.active = false;
        }
    }
}

/// 安装期间把会话交给子进程；可选在返回 TUI 前等待回车，方便查看输出
pub struct InstallConsole<'a> {
    session: &'a mut TerminalSession,
    pause: bool,
}

impl<'a> InstallConsole<'a> {
    pub fn new(session: &'a mut TerminalSession, pause: bool) -> Self {
        Self { session, pause }
    }
}

impl ConsoleHandoff for InstallConsole<'_> {
    fn release(&mut self) -> Result<()> {
        self.session.suspend()
    }

    fn reacquire(&mut self) -> Result<()> {
        if self.pause {
            print!("Press Enter to return to search...");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
        }
        self.session.resume()
    }
}
