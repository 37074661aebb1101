//! 搜索 / 安装相关数据类型定义

use chrono::{DateTime, Local};
use std::fmt;

/// 结果集硬上限
pub const MAX_RESULTS: usize = 200;
/// 包名最大字节数
pub const NAME_MAX_BYTES: usize = 127;
/// 描述最大字节数
pub const DESCRIPTION_MAX_BYTES: usize = 255;
/// 缺省描述
pub const NO_DESCRIPTION: &str = "N/A";

/// 结果来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// 本地仓库索引 (pacman -Ss)
    Local,
    /// 远程仓库 (AUR RPC)
    Remote,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Local => "PACMAN",
            Source::Remote => "AUR",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 搜索结果条目，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    source: Source,
    name: String,
    description: String,
}

impl SearchResult {
    /// 构造条目，name / description 按字节上限截断，空描述记为 "N/A"
    pub fn new(source: Source, name: &str, description: Option<&str>) -> Self {
        let description = match description.map(str::trim) {
            Some(d) if !d.is_empty() => truncate_bytes(d, DESCRIPTION_MAX_BYTES),
            _ => NO_DESCRIPTION,
        };
        Self {
            source,
            name: truncate_bytes(name, NAME_MAX_BYTES).to_string(),
            description: description.to_string(),
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 安装目标：name 的第一个空白分隔词（本地条目为 `repo/name`）
    pub fn install_target(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// 有序、有上限的结果集。聚合完成后不再修改。
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    items: Vec<SearchResult>,
}

impl ResultSet {
    /// 按顺序收集，超过 cap 的条目直接丢弃
    pub fn from_ordered<I>(results: I, cap: usize) -> Self
    where
        I: IntoIterator<Item = SearchResult>,
    {
        Self {
            items: results.into_iter().take(cap.min(MAX_RESULTS)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.items.iter()
    }

    pub fn count_by(&self, source: Source) -> usize {
        self.items.iter().filter(|r| r.source == source).count()
    }
}

/// 安装结果
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub package_name: String,
    pub source: Source,
    pub success: bool,
    /// 未能执行或执行失败的原因（退出码非零时为 None）
    pub error: Option<String>,
    pub finished_at: DateTime<Local>,
}

impl InstallOutcome {
    pub fn status_line(&self) -> String {
        let time = self.finished_at.format("%H:%M:%S");
        match (self.success, &self.error) {
            (true, _) => format!(
                "✓ {} installed from {} ({})",
                self.package_name, self.source, time
            ),
            (false, Some(err)) => {
                format!("✗ installation of {} failed: {} ({})", self.package_name, err, time)
            }
            (false, None) => format!("✗ installation of {} failed ({})", self.package_name, time),
        }
    }
}

/// 在 UTF-8 字符边界上截断到不超过 max 字节
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
