//! 搜索关键词校验

use std::fmt;
use thiserror::Error;

/// 关键词最大字节数
pub const QUERY_MAX_BYTES: usize = 127;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("empty query")]
    Empty,
    #[error("query must not start with '-'")]
    LeadingDash,
    #[error("query contains control characters")]
    ControlCharacter,
    #[error("query is longer than {QUERY_MAX_BYTES} bytes")]
    TooLong,
}

/// 已校验的搜索关键词。
///
/// 以 argv 形式传给子进程，URL 中由 reqwest 做百分号编码，
/// 这里只拒绝会被当成选项或无法安全显示的输入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(QueryError::LeadingDash);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(QueryError::ControlCharacter);
        }
        if trimmed.len() > QUERY_MAX_BYTES {
            return Err(QueryError::TooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
