//! Response Formatter: every response leaves through here so CORS headers and the
//! error envelope are identical across operations.

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;

use crate::errors::AppError;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// All failures share one status, including configuration and timeout errors.
pub const FAILURE_STATUS: StatusCode = StatusCode::BAD_REQUEST;

fn cors_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
    ]
}

fn with_json(status: StatusCode, body: String) -> Response {
    (
        status,
        cors_headers(),
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}

/// OPTIONS preflight: 200, body `ok`, no business logic.
pub fn preflight() -> Response {
    (StatusCode::OK, cors_headers(), "ok").into_response()
}

/// 200 with a body that is already JSON text, forwarded byte-for-byte.
pub fn json_text(body: String) -> Response {
    with_json(StatusCode::OK, body)
}

/// 200 with a JSON-encoded payload.
pub fn json<T: Serialize>(payload: &T) -> Response {
    match serde_json::to_string(payload) {
        Ok(body) => with_json(StatusCode::OK, body),
        Err(e) => failure(&AppError::UnexpectedResponseShape(format!(
            "could not encode response: {e}"
        ))),
    }
}

/// 400 with `{error, code, details, timestamp}`.
pub fn failure(error: &AppError) -> Response {
    let body = json!({
        "error": error.to_string(),
        "code": error.code(),
        "details": error.details(),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    with_json(FAILURE_STATUS, body.to_string())
}
