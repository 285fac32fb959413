use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use quota_proxy::{AppState, cache::RedisKvStore, config::Config, handlers};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Arc::new(Config::from_env().expect("Failed to load configuration"));

    // 设置 Redis 客户端
    let redis_client =
        redis::Client::open(config.redis_url.clone()).expect("Failed to create Redis client");
    let store = Arc::new(RedisKvStore::new(Arc::new(redis_client)));

    // 上游共享 HTTP 客户端，不跟随重定向（3xx 原样透传给调用方）
    let http = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client");

    let state = AppState::new(store, config.clone(), http);

    // 所有方法与路径都交给代理处理器
    let app = Router::new()
        .fallback(handlers::proxy_request::<RedisKvStore>)
        .with_state(state);

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!(
        "Proxy listening on {}, upstream {}, limit {}/{}s",
        addr,
        config.upstream_origin,
        config.rate_limit_requests,
        config.rate_limit_window_secs
    );
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
