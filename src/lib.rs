use std::sync::Arc;

use cache::store::KvStore;
use config::Config;
use limiter::RateLimiter;
use proxy::ProxyForwarder;
use stats::UsageStats;

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod proxy;
pub mod stats;

#[derive(Clone)]
pub struct AppState<S> {
    pub config: Arc<Config>,
    pub limiter: RateLimiter<S>,
    pub stats: UsageStats<S>,
    pub forwarder: ProxyForwarder,
}

impl<S: KvStore> AppState<S> {
    pub fn new(store: Arc<S>, config: Arc<Config>, http: reqwest::Client) -> Self {
        Self {
            limiter: RateLimiter::new(store.clone(), config.clone()),
            stats: UsageStats::new(store.clone(), config.clone()),
            forwarder: ProxyForwarder::new(http, config.clone()),
            config,
        }
    }
}
