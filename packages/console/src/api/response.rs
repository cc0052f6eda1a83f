// ABOUTME: Uniform response envelope shared by every API endpoint
// ABOUTME: Logical failures ship HTTP 200; infrastructure failures ship an opaque 500

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

/// The envelope every endpoint returns. Only the fields that are present
/// appear in the JSON output.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }

    /// Success envelope carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Wrap an envelope in an HTTP 200 response
pub fn envelope<T: Serialize>(response: ApiResponse<T>) -> Response {
    (StatusCode::OK, Json(response)).into_response()
}

/// A logical failure: validation, guard, or not-found. HTTP 200 with
/// `success: false`, matching the contract clients already depend on.
pub fn failure(error: impl Into<String>) -> Response {
    envelope(ApiResponse::<Value>::error(error))
}

/// Success envelope with only a message, no data
pub fn ok_message(message: impl Into<String>) -> Response {
    envelope(ApiResponse::<Value>::message(message))
}

/// An infrastructure failure. The error string is deliberately opaque;
/// driver detail goes to tracing and the error log, never to the client.
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<Value>::error("Database error")),
    )
        .into_response()
}

pub fn unauthorized(error: impl Into<String>) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<Value>::error(error)),
    )
        .into_response()
}

/// Extract the JSON object body, turning rejections and non-object bodies
/// into the envelope error the caller returns as-is
pub fn parse_body(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, Response> {
    match payload {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(failure("Invalid JSON: expected an object")),
        Err(rejection) => Err(failure(format!("Invalid JSON: {}", rejection.body_text()))),
    }
}
