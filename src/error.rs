use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mealgrid_shared::Error;
use serde_json::json;

/// Errors as answered over HTTP: a status code and a `{"message": ..}` body.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    NotFound(String),
    BadRequest(String),
    Server,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(resource) => ApiError::NotFound(format!("{resource} not found")),
            Error::InvalidArgument(message) => ApiError::BadRequest(message),
            Error::Validate(errors) => ApiError::BadRequest(errors.to_string()),
            Error::Server(_) | Error::Unknown(_) => {
                tracing::error!(error = %err, "request failed");
                ApiError::Server
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Token is not valid".to_string()),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Server => (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string()),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
