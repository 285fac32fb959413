use serde::{Deserialize, Serialize};

/// 使用统计缓存数据模型
///
/// 字段名与存储的 JSON 保持一致（camelCase）。
/// 注意：hitMaxLimitCount 统计的是下游失败的请求，
/// 被限流拦下的请求不会写入任何计数（沿用原有语义，勿改名）。
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CachedUsage {
    pub models_count: u64,
    pub success_count: u64,
    pub hit_max_limit_count: u64,
}

impl CachedUsage {
    /// 三个计数之和，等于该客户端被记录的请求总数
    pub fn total(&self) -> u64 {
        self.models_count + self.success_count + self.hit_max_limit_count
    }
}
