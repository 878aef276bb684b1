use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::AppState;

/// Service-level gate: every route except the health check requires
/// the shared x-api-key. Provider tokens are checked separately per
/// request by the handlers.
pub async fn verify_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let api_key = headers.get("x-api-key").and_then(|value| value.to_str().ok());

    match api_key {
        Some(key) if key == state.config.app_secret_key => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
