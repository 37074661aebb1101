use super::viewport::Viewport;
use crate::package_manager::InstallOutcome;

// ========== 枚举 ==========

pub enum Screen {
    /// 输入关键词
    Prompt,
    /// 浏览结果
    Browse(Viewport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// 输入框下方的提示
#[derive(Debug, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

// ========== 子状态 ==========

pub struct PromptState {
    pub input: String,
    /// 光标位置（按字符计数，非字节）
    pub cursor: usize,
}

impl PromptState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }
}

// ========== App ==========

pub struct App {
    pub screen: Screen,
    pub prompt: PromptState,
    pub status: Option<Status>,
    /// 正在搜索的关键词（用于绘制等待界面）
    pub searching: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Prompt,
            prompt: PromptState::new(),
            status: None,
            searching: None,
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    /// 回到输入框（安装或取消后）
    pub fn back_to_prompt(&mut self) {
        self.screen = Screen::Prompt;
    }

    pub fn record_install(&mut self, outcome: &InstallOutcome) {
        let kind = if outcome.success {
            StatusKind::Success
        } else {
            StatusKind::Error
        };
        self.set_status(kind, outcome.status_line());
        self.prompt.clear();
    }
}
