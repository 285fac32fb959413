use crate::cache::keys::usage_key;
use crate::cache::models::usage::CachedUsage;
use crate::cache::store::{KvStore, StoreError};

/// 使用统计缓存操作
pub struct UsageCacheOperations;

impl UsageCacheOperations {
    /// 获取客户端的使用统计，不存在时返回全零
    pub async fn get_usage<S: KvStore>(
        store: &S,
        identity: &str,
    ) -> Result<CachedUsage, StoreError> {
        let key = usage_key(identity);

        match store.get(&key).await? {
            Some(json) => {
                let usage = serde_json::from_str(&json)?;
                Ok(usage)
            }
            None => Ok(CachedUsage::default()),
        }
    }

    /// 写入使用统计，不设过期时间（长期保留）
    pub async fn put_usage<S: KvStore>(
        store: &S,
        identity: &str,
        usage: &CachedUsage,
    ) -> Result<(), StoreError> {
        let key = usage_key(identity);
        let json = serde_json::to_string(usage)?;

        store.put(&key, &json).await
    }
}
