// 缓存模块
// 包含存储接口、缓存数据结构和操作逻辑

pub mod keys;
pub mod models;
pub mod operations;
pub mod store;

// 重新导出常用类型和函数，方便其他模块使用
pub use models::rate_limit::CachedRequestLog;
pub use models::usage::CachedUsage;
pub use operations::rate_limit::RequestLogOperations;
pub use operations::usage::UsageCacheOperations;
pub use store::{KvStore, RedisKvStore, StoreError};
