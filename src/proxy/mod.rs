use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Method, header};

use crate::config::Config;

/// 上游转发器
///
/// 只负责按原样把请求发往固定上游源并返回响应，
/// 结果分类与配额补偿由调用方处理。
#[derive(Clone)]
pub struct ProxyForwarder {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl ProxyForwarder {
    pub fn new(http: reqwest::Client, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    /// 发起一次上游请求，不重试
    ///
    /// 保留原方法与请求体（流式透传，不缓冲），路径和查询串原样拼接到
    /// 上游源后面。移除入站 Host 头，由 HTTP 客户端按上游地址重写。
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        mut headers: HeaderMap,
        body: Body,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}{}", self.config.upstream_origin, path_and_query);

        headers.remove(header::HOST);

        self.http
            .request(method, url)
            .headers(headers)
            .body(reqwest::Body::wrap_stream(body.into_data_stream()))
            .send()
            .await
    }
}
