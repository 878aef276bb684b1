use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Mail provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not decode provider response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Could not encode outbound message: {0}")]
    Encoding(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Authentication(_) => {
                (StatusCode::UNAUTHORIZED, "Invalid or missing provider token")
            }
            AppError::Transport(e) => {
                if let Some(reqwest_status) = e.status() {
                    // Convert reqwest::StatusCode (http 0.2) to axum::http::StatusCode (http 1.0)
                    let status_code = StatusCode::from_u16(reqwest_status.as_u16())
                        .unwrap_or(StatusCode::BAD_GATEWAY);
                    (status_code, "Mail provider returned an error")
                } else {
                    (StatusCode::BAD_GATEWAY, "Failed to reach mail provider")
                }
            }
            AppError::Parse(_) => (StatusCode::BAD_GATEWAY, "Unexpected mail provider response"),
            AppError::Encoding(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Message could not be encoded")
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(json!({
            "error": error_message,
            "details": self.to_string()
        }));

        (status, body).into_response()
    }
}
