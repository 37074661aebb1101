//! 聚合本地与远程搜索结果

use super::local::LocalSource;
use super::query::Query;
use super::remote::RemoteSource;
use super::types::{ResultSet, Source, MAX_RESULTS};
use serde::{Deserialize, Serialize};

/// 结果集中两个来源的先后顺序，同时也是查询顺序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceOrder {
    #[default]
    LocalFirst,
    RemoteFirst,
}

pub struct Aggregator<L, R> {
    local: L,
    remote: R,
    order: SourceOrder,
    cap: usize,
}

impl<L, R> Aggregator<L, R>
where
    L: LocalSource,
    R: RemoteSource + Sync,
{
    pub fn new(local: L, remote: R, order: SourceOrder, cap: usize) -> Self {
        Self {
            local,
            remote,
            order,
            cap: cap.clamp(1, MAX_RESULTS),
        }
    }

    /// 依次查询两个来源并拼接，总数截断到 cap；先查询的来源优先保留。
    ///
    /// 两个来源都没有结果时返回空结果集，这不是错误。
    pub async fn aggregate(&self, query: &Query) -> ResultSet {
        let (first, second) = match self.order {
            SourceOrder::LocalFirst => {
                let local = self.local.search(query);
                let remote = self.remote.search(query).await;
                (local, remote)
            }
            SourceOrder::RemoteFirst => {
                let remote = self.remote.search(query).await;
                let local = self.local.search(query);
                (remote, local)
            }
        };

        let dropped = (first.len() + second.len()).saturating_sub(self.cap);
        if dropped > 0 {
            log::debug!("结果超过上限 {}，丢弃 {} 条", self.cap, dropped);
        }

        let set = ResultSet::from_ordered(first.into_iter().chain(second), self.cap);
        log::info!(
            "搜索 {:?} 完成: 本地 {} 条, 远程 {} 条",
            query.as_str(),
            set.count_by(Source::Local),
            set.count_by(Source::Remote)
        );
        set
    }
}
