use std::sync::Arc;

use crate::cache::RequestLogOperations;
use crate::cache::store::KvStore;
use crate::config::Config;

/// 准入判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// 放行
    Admit,
    /// 拒绝，携带建议等待秒数
    Reject { wait_secs: i64 },
}

/// 滑动窗口日志限流器
///
/// 每个客户端在外部存储中维护一份已放行请求的时间戳日志，
/// 窗口内日志长度达到上限即拒绝。过期项只在读取时过滤（惰性淘汰），
/// 没有后台清理任务。读-改-写整个过程不是临界区：同一客户端并发
/// 请求可能都读到旧日志而被同时放行，写入后者覆盖前者。存储不提供
/// CAS，这里按有界超放行接受该竞争窗口，不加进程内锁。
#[derive(Clone)]
pub struct RateLimiter<S> {
    store: Arc<S>,
    config: Arc<Config>,
}

impl<S: KvStore> RateLimiter<S> {
    pub fn new(store: Arc<S>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// 准入检查
    ///
    /// 豁免路径直接放行且不读写日志。存储故障时降级放行（fail-open）：
    /// 限流器失效不应导致整个 API 不可用。
    pub async fn check(&self, identity: &str, path: &str, now: i64) -> Decision {
        if path == self.config.exempt_path {
            return Decision::Admit;
        }

        let window = self.config.rate_limit_window_secs as i64;

        let mut log = match RequestLogOperations::get_log(self.store.as_ref(), identity).await {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!("读取限流日志失败，降级放行: {}", e);
                return Decision::Admit;
            }
        };

        // 惰性淘汰：过滤掉窗口外的时间戳
        log.timestamps.retain(|&ts| now - ts < window);

        if log.len() >= self.config.rate_limit_requests as usize {
            if let Some(&oldest) = log.timestamps.first() {
                let wait_secs = window - (now - oldest);
                if wait_secs > 0 {
                    // 拒绝分支不写回：被拒请求在日志中不留痕迹
                    return Decision::Reject { wait_secs };
                }
                // 时钟异常兜底：最旧项已过期却未被过滤，去掉一项后放行
                log.timestamps.remove(0);
            }
        }

        log.timestamps.push(now);

        if let Err(e) =
            RequestLogOperations::put_log(self.store.as_ref(), identity, &log, window as u64).await
        {
            tracing::warn!("写入限流日志失败，本次放行不计入配额: {}", e);
        }

        Decision::Admit
    }

    /// 回滚补偿：撤销最近一次放行占用的配额槽位
    ///
    /// 每个放行请求至多调用一次，且仅在下游判定为失败时调用。
    /// 移除的是日志尾项（按位置而非归属），日志为空或已过期时为空操作。
    pub async fn rollback(&self, identity: &str) {
        let mut log = match RequestLogOperations::get_log(self.store.as_ref(), identity).await {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!("回滚时读取限流日志失败: {}", e);
                return;
            }
        };

        if log.is_empty() {
            return;
        }

        log.timestamps.pop();

        let window = self.config.rate_limit_window_secs;
        if let Err(e) =
            RequestLogOperations::put_log(self.store.as_ref(), identity, &log, window).await
        {
            tracing::warn!("回滚时写入限流日志失败: {}", e);
        }
    }
}
