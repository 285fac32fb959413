/// 缓存操作
/// 提供缓存操作的功能实现

// 限流日志缓存操作
pub mod rate_limit;

// 使用统计缓存操作
pub mod usage;

// 重新导出常用操作
pub use rate_limit::RequestLogOperations;
pub use usage::UsageCacheOperations;
