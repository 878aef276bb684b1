use axum::{
    extract::{Json, Path, Query, State},
    http::HeaderMap,
};
use serde::Deserialize;

use super::gmail::GmailProvider;
use super::provider::{
    EmailProvider, Label, ListParams, MessageView, Profile, SendMessageRequest, SendResult,
    ThreadPage, ThreadView,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Deserialize)]
pub struct ProviderParams {
    pub provider: Option<String>,
}

/// Provider credential resolution: a bearer token in Authorization,
/// with the legacy x-google-token header as fallback.
fn get_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(|t| t.trim_start_matches("Bearer "))
        .or_else(|| headers.get("x-google-token").and_then(|h| h.to_str().ok()))
        .map(|t| t.trim())
        .ok_or_else(|| AppError::Authentication("missing provider token".to_string()))
}

fn resolve_provider(
    state: &AppState,
    params: &ProviderParams,
) -> Result<Box<dyn EmailProvider>, AppError> {
    match params.provider.as_deref() {
        None | Some("gmail") | Some("google") => Ok(Box::new(GmailProvider::new(
            state.http.clone(),
            state.config.gmail_base_url.clone(),
        ))),
        Some(other) => Err(AppError::BadRequest(format!(
            "Unsupported provider '{}'",
            other
        ))),
    }
}

// --- Handlers ---

pub async fn list_threads(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(provider_params): Query<ProviderParams>,
    Query(list_params): Query<ListParams>,
) -> Result<Json<ThreadPage>, AppError> {
    let token = get_token(&headers)?;
    let provider = resolve_provider(&state, &provider_params)?;

    let page = provider.list_threads(token, list_params).await?;
    Ok(Json(page))
}

pub async fn get_thread(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(provider_params): Query<ProviderParams>,
) -> Result<Json<ThreadView>, AppError> {
    let token = get_token(&headers)?;
    let provider = resolve_provider(&state, &provider_params)?;

    let thread = provider.get_thread(token, &id).await?;
    Ok(Json(thread))
}

pub async fn get_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(provider_params): Query<ProviderParams>,
) -> Result<Json<MessageView>, AppError> {
    let token = get_token(&headers)?;
    let provider = resolve_provider(&state, &provider_params)?;

    let message = provider.get_message(token, &id).await?;
    Ok(Json(message))
}

pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(provider_params): Query<ProviderParams>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<SendResult>, AppError> {
    let token = get_token(&headers)?;
    let provider = resolve_provider(&state, &provider_params)?;

    let result = provider.send_message(token, payload).await?;
    Ok(Json(result))
}

pub async fn list_labels(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(provider_params): Query<ProviderParams>,
) -> Result<Json<Vec<Label>>, AppError> {
    let token = get_token(&headers)?;
    let provider = resolve_provider(&state, &provider_params)?;

    let labels = provider.list_labels(token).await?;
    Ok(Json(labels))
}

pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(provider_params): Query<ProviderParams>,
) -> Result<Json<Profile>, AppError> {
    let token = get_token(&headers)?;
    let provider = resolve_provider(&state, &provider_params)?;

    let profile = provider.get_profile(token).await?;
    Ok(Json(profile))
}
