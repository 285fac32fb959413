use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub upstream_origin: String,
    pub server_host: String,
    pub server_port: u16,
    pub rate_limit_requests: u32,
    pub rate_limit_window_secs: u64,
    pub exempt_path: String,
    pub client_ip_header: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            redis_url: env::var("REDIS_URL")?,
            // 上游源地址，末尾不带斜杠，例如 https://api.openai.com
            upstream_origin: env::var("UPSTREAM_ORIGIN")?
                .trim_end_matches('/')
                .to_string(),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            rate_limit_requests: env::var("RATE_LIMIT_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            exempt_path: env::var("EXEMPT_PATH").unwrap_or_else(|_| "/v1/models".into()),
            client_ip_header: env::var("CLIENT_IP_HEADER")
                .unwrap_or_else(|_| "cf-connecting-ip".into()),
        })
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

#[cfg(test)]
impl Config {
    /// 测试用配置，限流参数可指定
    pub fn for_tests(limit: u32, window_secs: u64) -> Self {
        Config {
            redis_url: "redis://localhost".into(),
            upstream_origin: "http://upstream.invalid".into(),
            server_host: "127.0.0.1".into(),
            server_port: 0,
            rate_limit_requests: limit,
            rate_limit_window_secs: window_secs,
            exempt_path: "/v1/models".into(),
            client_ip_header: "cf-connecting-ip".into(),
        }
    }
}
