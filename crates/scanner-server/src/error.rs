//! API-layer error type

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scanner_stream::StreamError;
use serde::Serialize;

/// API-layer error type
#[derive(Debug)]
pub enum ApiError {
    /// 400 - Bad request (invalid input)
    BadRequest(String),

    /// 500 - Internal error
    Internal(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_type.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

// A rejected stream request never started emitting frames, so a plain
// status response is still possible.
impl From<StreamError> for ApiError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::EmptyRequest => ApiError::BadRequest(err.to_string()),
        }
    }
}
