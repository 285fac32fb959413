use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::AppState;
use crate::cache::store::KvStore;
use crate::error::AppError;
use crate::limiter::Decision;
use crate::stats::RequestOutcome;

/// 代理请求处理器，接管所有方法与路径
///
/// 每个入站请求的流转：提取客户端标识与路径 → 准入检查 →
/// 被拒则直接返回 429；放行则转发上游一次（不重试），
/// 失败（状态码为 500 或传输错误）时回滚配额并返回 500，
/// 其余状态码原样透传并附加跨域头。
pub async fn proxy_request<S: KvStore>(
    State(state): State<AppState<S>>,
    req: Request<Body>,
) -> Response {
    // 客户端标识取自边缘网络注入的可信 IP 头，缺失时为空串
    // （所有无头请求共享同一个键，不做特殊处理）
    let identity = req
        .headers()
        .get(&state.config.client_ip_header)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let path = req.uri().path().to_string();
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());

    let now = chrono::Utc::now().timestamp();

    if let Decision::Reject { wait_secs } = state.limiter.check(&identity, &path, now).await {
        tracing::debug!(%identity, wait_secs, "限流拒绝");
        return throttled_response(wait_secs);
    }

    let (parts, body) = req.into_parts();

    match state
        .forwarder
        .forward(parts.method, &path_and_query, parts.headers, body)
        .await
    {
        Ok(upstream) if upstream.status() != StatusCode::INTERNAL_SERVER_ERROR => {
            // 非 500 状态码（含 4xx/502/503）都按成功记账并透传
            state
                .stats
                .record(&identity, &path, RequestOutcome::Success)
                .await;
            passthrough_response(upstream)
        }
        Ok(upstream) => {
            tracing::error!(%identity, status = %upstream.status(), "上游返回 500，回滚配额");
            state.limiter.rollback(&identity).await;
            state
                .stats
                .record(&identity, &path, RequestOutcome::Failure)
                .await;
            AppError::UpstreamFailure.into_response()
        }
        Err(e) => {
            tracing::error!(%identity, "转发失败，回滚配额: {}", e);
            state.limiter.rollback(&identity).await;
            state
                .stats
                .record(&identity, &path, RequestOutcome::Failure)
                .await;
            AppError::UpstreamFailure.into_response()
        }
    }
}

/// 429 限流响应，携带 Retry-After
fn throttled_response(wait_secs: i64) -> Response {
    let mut resp = (
        StatusCode::TOO_MANY_REQUESTS,
        format!("请求过于频繁，请在{}秒后重试", wait_secs),
    )
        .into_response();

    let headers = resp.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&wait_secs.to_string()) {
        headers.insert(header::RETRY_AFTER, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    resp
}

/// 上游响应透传：状态码与头原样保留，跨域头强制覆盖为 *，响应体流式回传
fn passthrough_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();

    // 逐跳头由本地连接自行决定
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONNECTION);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    let mut resp = Response::new(Body::from_stream(upstream.bytes_stream()));
    *resp.status_mut() = status;
    *resp.headers_mut() = headers;
    resp
}
