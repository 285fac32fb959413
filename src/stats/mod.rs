use std::sync::Arc;

use crate::cache::UsageCacheOperations;
use crate::cache::models::usage::CachedUsage;
use crate::cache::store::KvStore;
use crate::config::Config;

/// 下游转发结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// 上游返回非 500 状态码（含 4xx/502/503 等）
    Success,
    /// 上游返回 500 或转发本身失败
    Failure,
}

/// 使用统计记录器
///
/// 纯观测数据，与准入判定无关，无一致性要求。
/// 每次 record 恰好递增三个计数中的一个。
#[derive(Clone)]
pub struct UsageStats<S> {
    store: Arc<S>,
    config: Arc<Config>,
}

impl<S: KvStore> UsageStats<S> {
    pub fn new(store: Arc<S>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// 记录一次请求结果，返回更新后的计数
    ///
    /// 分类互斥，按优先级：豁免路径 → modelsCount；
    /// 失败 → hitMaxLimitCount；否则 → successCount。
    /// 存储故障时记录警告并放弃本次写入。
    pub async fn record(
        &self,
        identity: &str,
        path: &str,
        outcome: RequestOutcome,
    ) -> CachedUsage {
        let mut usage = match UsageCacheOperations::get_usage(self.store.as_ref(), identity).await
        {
            Ok(usage) => usage,
            Err(e) => {
                tracing::warn!("读取使用统计失败，跳过本次记录: {}", e);
                return CachedUsage::default();
            }
        };

        if path == self.config.exempt_path {
            usage.models_count += 1;
        } else if outcome == RequestOutcome::Failure {
            usage.hit_max_limit_count += 1;
        } else {
            usage.success_count += 1;
        }

        if let Err(e) =
            UsageCacheOperations::put_usage(self.store.as_ref(), identity, &usage).await
        {
            tracing::warn!("写入使用统计失败: {}", e);
        }

        usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::test_store::MemoryKvStore;

    fn stats() -> (UsageStats<MemoryKvStore>, Arc<MemoryKvStore>) {
        let store = Arc::new(MemoryKvStore::new());
        let config = Arc::new(Config::for_tests(10, 120));
        (UsageStats::new(store.clone(), config), store)
    }

    #[tokio::test]
    async fn exempt_path_increments_models_count_regardless_of_outcome() {
        let (stats, _) = stats();

        let usage = stats
            .record("1.2.3.4", "/v1/models", RequestOutcome::Failure)
            .await;

        assert_eq!(usage.models_count, 1);
        assert_eq!(usage.success_count, 0);
        assert_eq!(usage.hit_max_limit_count, 0);
    }

    #[tokio::test]
    async fn failure_increments_hit_max_limit_count() {
        let (stats, _) = stats();

        let usage = stats
            .record("1.2.3.4", "/v1/chat", RequestOutcome::Failure)
            .await;

        assert_eq!(usage.hit_max_limit_count, 1);
        assert_eq!(usage.total(), 1);
    }

    #[tokio::test]
    async fn success_increments_success_count() {
        let (stats, _) = stats();

        let usage = stats
            .record("1.2.3.4", "/v1/chat", RequestOutcome::Success)
            .await;

        assert_eq!(usage.success_count, 1);
        assert_eq!(usage.total(), 1);
    }

    #[tokio::test]
    async fn counters_sum_equals_record_calls() {
        let (stats, store) = stats();

        stats.record("1.2.3.4", "/v1/models", RequestOutcome::Success).await;
        stats.record("1.2.3.4", "/v1/chat", RequestOutcome::Success).await;
        stats.record("1.2.3.4", "/v1/chat", RequestOutcome::Failure).await;
        stats.record("1.2.3.4", "/v1/chat", RequestOutcome::Success).await;

        let usage = UsageCacheOperations::get_usage(store.as_ref(), "1.2.3.4")
            .await
            .unwrap();
        assert_eq!(usage.models_count, 1);
        assert_eq!(usage.success_count, 2);
        assert_eq!(usage.hit_max_limit_count, 1);
        assert_eq!(usage.total(), 4);
    }

    #[tokio::test]
    async fn stored_json_keeps_camel_case_field_names() {
        let (stats, store) = stats();

        stats.record("1.2.3.4", "/v1/chat", RequestOutcome::Success).await;

        let json = store.raw_get("usage:1.2.3.4").unwrap();
        assert!(json.contains("successCount"));
        assert!(json.contains("hitMaxLimitCount"));
        assert!(json.contains("modelsCount"));
    }
}
