use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum AppError {
    /// 上游返回 500 或转发本身失败，统一对外映射为 500
    UpstreamFailure,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::UpstreamFailure => (StatusCode::INTERNAL_SERVER_ERROR, "上游请求失败"),
        };

        let mut resp = (status, error_message).into_response();
        resp.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        resp
    }
}
