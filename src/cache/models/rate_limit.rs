use serde::{Deserialize, Serialize};

/// 限流时间戳日志缓存数据模型
///
/// 每个客户端一条记录，按到达顺序保存已放行请求的 Unix 秒级时间戳，
/// 插入顺序即时间升序，读取时惰性过滤过期项，不做重排序。
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CachedRequestLog {
    pub timestamps: Vec<i64>,
}

impl CachedRequestLog {
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }
}
