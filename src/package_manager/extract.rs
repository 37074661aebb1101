//! 宽松字段提取：从半结构化文本里取出 `"<label>":"value"` 形式的字符串字段。
//!
//! 这不是 JSON 解析器：不处理括号和转义，不校验文档结构。
//! 记录以 `"Name":"` 锚点划分，第 i 条记录的其他字段只在第 i 个与第 i+1 个
//! 锚点之间查找，因此缺失的字段不会"借用"后一条记录的值。

use super::types::{truncate_bytes, DESCRIPTION_MAX_BYTES, NAME_MAX_BYTES};

const NAME_LABEL: &str = "Name";
const DESCRIPTION_LABEL: &str = "Description";

fn anchor(label: &str) -> String {
    format!("\"{label}\":\"")
}

/// 在 text 中查找第一个 `"<label>":"`，返回其后直到下一个 `"` 的内容（最多 max_bytes 字节）。
///
/// 标签不存在、值为空、或没有结束引号（截断）时返回 None。
pub fn extract_field<'a>(text: &'a str, label: &str, max_bytes: usize) -> Option<&'a str> {
    let anchor = anchor(label);
    let start = text.find(&anchor)? + anchor.len();
    let rest = &text[start..];
    let end = rest.find('"')?;
    let value = &rest[..end];
    if value.is_empty() {
        return None;
    }
    Some(truncate_bytes(value, max_bytes))
}

/// 一条提取出的记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// 按 `Name` 锚点逐条扫描记录
pub fn records(text: &str) -> Records<'_> {
    Records {
        text,
        cursor: 0,
        name_anchor: anchor(NAME_LABEL),
    }
}

pub struct Records<'a> {
    text: &'a str,
    cursor: usize,
    name_anchor: String,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        let text = self.text;
        loop {
            let found = text[self.cursor..].find(&self.name_anchor)?;
            let start = self.cursor + found + self.name_anchor.len();
            // 记录边界：下一个 Name 锚点或文本末尾
            let end = text[start..]
                .find(&self.name_anchor)
                .map(|i| start + i)
                .unwrap_or(text.len());
            self.cursor = end;

            let segment = &text[start..end];
            match segment.find('"') {
                Some(close) if close > 0 => {
                    let name = truncate_bytes(&segment[..close], NAME_MAX_BYTES);
                    let description = extract_field(
                        &segment[close + 1..],
                        DESCRIPTION_LABEL,
                        DESCRIPTION_MAX_BYTES,
                    );
                    return Some(Record { name, description });
                }
                _ => {
                    log::debug!("跳过无法读取的记录 (offset {})", start);
                }
            }
        }
    }
}
