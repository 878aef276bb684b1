use async_trait::async_trait;
use crate::error::AppError;
use crate::mail::quote::ExtractedBody;
use serde::{Deserialize, Serialize};

// --- DTOs ---

#[derive(Deserialize, Debug)]
pub struct ListParams {
    pub label_ids: Option<String>, // Comma separated
    pub max_results: Option<u32>,
    pub q: Option<String>,
    pub page_token: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ThreadSummary {
    pub id: String,
    pub snippet: String,
    pub subject: Option<String>,
    pub from: Option<String>,
    pub date: Option<String>,
    pub unread: bool,
    pub message_count: usize,
    /// Envelope per message, in provider order; bodies are fetched
    /// separately by message id.
    pub messages: Vec<MessageEnvelope>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageEnvelope {
    pub id: String,
    pub subject: Option<String>,
    pub from: Option<String>,
    pub date: Option<String>,
    pub unread: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ThreadPage {
    pub threads: Vec<ThreadSummary>,
    pub next_page_token: Option<String>,
    pub result_size_estimate: Option<u64>,
}

/// One message rendered for display: envelope headers plus the
/// extracted reply/quote body. Recomputed on every fetch, never cached.
#[derive(Serialize, Debug)]
pub struct MessageView {
    pub id: String,
    pub thread_id: String,
    pub subject: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub date: Option<String>,
    /// Provider receive timestamp, milliseconds since epoch; the
    /// explicit sort key for display ordering
    pub internal_date: Option<String>,
    pub message_id: Option<String>,
    pub references: Option<String>,
    pub snippet: String,
    pub body: ExtractedBody,
}

#[derive(Serialize, Debug)]
pub struct ThreadView {
    pub id: String,
    pub messages: Vec<MessageView>,
}

#[derive(Deserialize, Debug)]
pub struct SendMessageRequest {
    pub to: Vec<String>,
    pub cc: Option<Vec<String>>,
    pub bcc: Option<Vec<String>>,
    pub subject: String,
    pub body: String,
    pub thread_id: Option<String>,
    /// Message-ID header value of the message being replied to
    pub in_reply_to: Option<String>,
    /// Prior References header value of the message being replied to
    pub references: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SendResult {
    pub id: String,
    pub thread_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub label_type: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct Profile {
    pub email_address: String,
    pub provider: String,
    pub messages_total: Option<u64>,
}

// --- Provider seam ---

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn list_threads(&self, token: &str, params: ListParams) -> Result<ThreadPage, AppError>;
    async fn get_thread(&self, token: &str, id: &str) -> Result<ThreadView, AppError>;
    async fn get_message(&self, token: &str, id: &str) -> Result<MessageView, AppError>;
    async fn send_message(
        &self,
        token: &str,
        req: SendMessageRequest,
    ) -> Result<SendResult, AppError>;
    async fn list_labels(&self, token: &str) -> Result<Vec<Label>, AppError>;
    async fn get_profile(&self, token: &str) -> Result<Profile, AppError>;
}
