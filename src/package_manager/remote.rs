//! 远程仓库搜索 (AUR RPC)

use super::extract;
use super::query::Query;
use super::types::{SearchResult, Source};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

pub const AUR_RPC_URL: &str = "https://aur.archlinux.org/rpc/";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("registry returned HTTP {0}")]
    Status(u16),
    #[error("registry returned an empty body")]
    EmptyBody,
}

#[async_trait]
pub trait RemoteSource {
    /// 搜索远程仓库；任何网络错误都降级为空列表
    async fn search(&self, query: &Query) -> Vec<SearchResult>;
}

pub struct AurClient {
    client: Client,
    endpoint: String,
    cap: usize,
}

impl AurClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, cap: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("aurseek/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            cap,
        })
    }

    /// 发起一次 GET，返回完整响应体
    pub async fn fetch(&self, query: &Query) -> Result<String, RegistryError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("v", "5"), ("type", "search"), ("arg", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(RegistryError::EmptyBody);
        }
        Ok(body)
    }
}

#[async_trait]
impl RemoteSource for AurClient {
    async fn search(&self, query: &Query) -> Vec<SearchResult> {
        let body = match self.fetch(query).await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("AUR 搜索失败，按零结果处理: {}", e);
                return Vec::new();
            }
        };

        let results: Vec<SearchResult> = extract::records(&body)
            .take(self.cap)
            .map(|r| SearchResult::new(Source::Remote, r.name, r.description))
            .collect();
        log::info!("AUR 搜索 {:?}: {} 条结果", query.as_str(), results.len());
        results
    }
}
