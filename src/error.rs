use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures that end a generation turn. Neither kind is retried.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model runtime rejected the request or could not be reached.
    #[error("{0}")]
    Runtime(String),

    /// The chat client could not reach the generation service, or got back
    /// something it could not read.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ResponseError for GenerationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(json!({
            "detail": self.to_string()
        }))
    }
}
