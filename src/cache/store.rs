use std::fmt;
use std::sync::Arc;

use redis::{AsyncCommands, Client as RedisClient};

/// 存储层错误
#[derive(Debug)]
pub enum StoreError {
    /// 后端（Redis）访问失败
    Backend(String),
    /// 存储值序列化/反序列化失败
    Codec(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "store backend error: {}", msg),
            StoreError::Codec(msg) => write!(f, "store codec error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Codec(e.to_string())
    }
}

/// 键值存储接口
///
/// 对应外部存储的能力边界：仅有 get / put（可带过期时间），
/// 无删除、无 CAS、无事务。每次 put 都重置该键的过期时间。
#[allow(async_fn_in_trait)]
pub trait KvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// 无过期时间写入
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// 带过期时间写入，覆盖该键之前的任何 TTL
    async fn put_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError>;
}

/// Redis 实现
#[derive(Clone)]
pub struct RedisKvStore {
    redis: Arc<RedisClient>,
}

impl RedisKvStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let result: Option<String> = conn.get(key).await?;
        Ok(result)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn put_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key, value, ttl_secs).await?;
        Ok(())
    }
}
