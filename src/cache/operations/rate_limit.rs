use crate::cache::keys::rate_limit_key;
use crate::cache::models::rate_limit::CachedRequestLog;
use crate::cache::store::{KvStore, StoreError};

/// 限流日志缓存操作
pub struct RequestLogOperations;

impl RequestLogOperations {
    /// 获取客户端的时间戳日志，不存在时返回空日志
    pub async fn get_log<S: KvStore>(
        store: &S,
        identity: &str,
    ) -> Result<CachedRequestLog, StoreError> {
        let key = rate_limit_key(identity);

        match store.get(&key).await? {
            Some(json) => {
                let log = serde_json::from_str(&json)?;
                Ok(log)
            }
            None => Ok(CachedRequestLog::default()),
        }
    }

    /// 写入时间戳日志，过期时间设为窗口长度（每次写入重置）
    pub async fn put_log<S: KvStore>(
        store: &S,
        identity: &str,
        log: &CachedRequestLog,
        window_secs: u64,
    ) -> Result<(), StoreError> {
        let key = rate_limit_key(identity);
        let json = serde_json::to_string(log)?;

        store.put_ex(&key, &json, window_secs).await
    }
}
