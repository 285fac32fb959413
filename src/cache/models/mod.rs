// 限流日志数据模型
pub mod rate_limit;

// 使用统计数据模型
pub mod usage;

pub use rate_limit::CachedRequestLog;
pub use usage::CachedUsage;
