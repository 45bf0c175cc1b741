use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use login_throttle_core::AppError;
use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    blocked_request: Option<String>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            blocked_request: None,
        }
    }

    fn with_blocked_request(mut self, notice: impl Into<String>) -> Self {
        self.blocked_request = Some(notice.into());
        self
    }
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    blocked_request: Option<String>,
}

impl ApiError {
    /// Annotates the error as a rejection of a temporarily blocked client.
    pub fn with_blocked_request(mut self, notice: impl Into<String>) -> Self {
        self.blocked_request = Some(notice.into());
        self
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        let blocked_request = match &value {
            AppError::RateLimited(notice) => Some(notice.clone()),
            _ => None,
        };

        Self {
            error: value,
            blocked_request,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut payload = ErrorResponse::new(self.error.to_string());
        if let Some(notice) = self.blocked_request {
            payload = payload.with_blocked_request(notice);
        }

        (status, Json(payload)).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
