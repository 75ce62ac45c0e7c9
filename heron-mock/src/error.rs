//! 统一错误处理
//!
//! Every failure leaves the server as the uniform envelope with
//! `success: false`; the HTTP status mirrors the envelope code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::Envelope;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 未登录或令牌无效 (401)
    #[error("Unauthorized")]
    Unauthorized(String),

    /// 无权限 (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// 资源不存在 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 请求格式错误 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 内部错误 (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Unauthorized(m) => m.clone(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        let body: Envelope<serde_json::Value> =
            Envelope::error(status.as_u16() as i32, self.message());
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
