use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::provider::{
    EmailProvider, Label, ListParams, MessageEnvelope, MessageView, Profile, SendMessageRequest,
    SendResult, ThreadPage, ThreadSummary, ThreadView,
};
use crate::error::AppError;
use crate::mail::compose::{build_rfc822, OutboundMessage};
use crate::mail::encoding::encode_raw_message;
use crate::mail::extract_body;
use crate::mail::model::{
    GmailLabel, GmailMessage, GmailProfile, GmailThread, ListLabelsResponse, SendResponse,
    ThreadListResponse,
};

/// Hard page-size cap; larger requests are clamped, absent means default.
const MAX_PAGE_SIZE: u32 = 50;
const DEFAULT_PAGE_SIZE: u32 = 25;

/// Header set fetched for thread summaries during the listing fan-out.
const SUMMARY_HEADERS: [&str; 4] = ["Subject", "From", "To", "Date"];

pub struct GmailProvider {
    client: Client,
    base_url: String,
}

impl GmailProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// GET a Gmail endpoint and decode the JSON body. The body is read
    /// as text first so a shape mismatch surfaces as a Parse error
    /// rather than a transport one.
    async fn get_json<T: DeserializeOwned>(&self, token: &str, url: &str) -> Result<T, AppError> {
        let res = self.client.get(url).bearer_auth(token).send().await?;
        let res = check_status(res)?;
        let text = res.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Phase 2 of the listing: one metadata fetch for a single thread.
    /// A thread whose detail comes back without messages is dropped
    /// (None), tolerating provider inconsistency between the listing
    /// and detail endpoints.
    async fn fetch_thread_summary(
        &self,
        token: &str,
        id: &str,
    ) -> Result<Option<ThreadSummary>, AppError> {
        let mut url = format!("{}/users/me/threads/{}?format=metadata", self.base_url, id);
        for name in SUMMARY_HEADERS {
            url.push_str(&format!("&metadataHeaders={}", name));
        }

        let thread: GmailThread = self.get_json(token, &url).await?;
        let messages = thread.messages.unwrap_or_default();

        let Some((first, last)) = messages.first().zip(messages.last()) else {
            tracing::debug!(thread_id = %id, "thread detail had no messages, dropping");
            return Ok(None);
        };

        let envelopes: Vec<MessageEnvelope> = messages.iter().map(envelope_of).collect();
        let unread = envelopes.iter().any(|e| e.unread);

        Ok(Some(ThreadSummary {
            id: thread.id,
            snippet: last
                .snippet
                .as_deref()
                .map(decode_snippet)
                .unwrap_or_default(),
            subject: header_of(first, "Subject"),
            from: header_of(last, "From"),
            date: header_of(last, "Date"),
            unread,
            message_count: messages.len(),
            messages: envelopes,
        }))
    }

    async fn fetch_profile(&self, token: &str) -> Result<GmailProfile, AppError> {
        let url = format!("{}/users/me/profile", self.base_url);
        self.get_json(token, &url).await
    }
}

#[async_trait]
impl EmailProvider for GmailProvider {
    async fn list_threads(&self, token: &str, params: ListParams) -> Result<ThreadPage, AppError> {
        let max_results = params
            .max_results
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let mut query = vec![format!("maxResults={}", max_results)];
        if let Some(q) = &params.q {
            query.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(page_token) = &params.page_token {
            query.push(format!("pageToken={}", page_token));
        }
        if let Some(labels) = &params.label_ids {
            for label in labels.split(',') {
                query.push(format!("labelIds={}", label.trim()));
            }
        }

        let url = format!("{}/users/me/threads?{}", self.base_url, query.join("&"));
        let list: ThreadListResponse = self.get_json(token, &url).await?;
        let refs = list.threads.unwrap_or_default();

        tracing::debug!(count = refs.len(), "listed thread page, fetching detail");

        // Fan out one detail fetch per thread and join on all of them.
        // The page is all-or-nothing: the first failure rejects the
        // join and the in-flight siblings are dropped.
        let summaries = try_join_all(
            refs.iter()
                .map(|t| self.fetch_thread_summary(token, &t.id)),
        )
        .await?;

        Ok(ThreadPage {
            threads: summaries.into_iter().flatten().collect(),
            next_page_token: list.next_page_token,
            result_size_estimate: list.result_size_estimate,
        })
    }

    async fn get_thread(&self, token: &str, id: &str) -> Result<ThreadView, AppError> {
        let url = format!("{}/users/me/threads/{}?format=full", self.base_url, id);
        let thread: GmailThread = self.get_json(token, &url).await?;

        let messages = thread
            .messages
            .unwrap_or_default()
            .iter()
            .map(message_view)
            .collect();

        Ok(ThreadView {
            id: thread.id,
            messages,
        })
    }

    async fn get_message(&self, token: &str, id: &str) -> Result<MessageView, AppError> {
        let url = format!("{}/users/me/messages/{}?format=full", self.base_url, id);
        let message: GmailMessage = self.get_json(token, &url).await?;
        Ok(message_view(&message))
    }

    async fn send_message(
        &self,
        token: &str,
        req: SendMessageRequest,
    ) -> Result<SendResult, AppError> {
        if req.to.is_empty() {
            return Err(AppError::BadRequest(
                "At least one recipient is required".to_string(),
            ));
        }

        // The sending address comes from the profile; the token is the
        // only credential this service holds.
        let profile = self.fetch_profile(token).await?;

        let outbound = OutboundMessage {
            from: &profile.email_address,
            to: &req.to,
            cc: req.cc.as_deref().unwrap_or_default(),
            bcc: req.bcc.as_deref().unwrap_or_default(),
            subject: &req.subject,
            body: &req.body,
            in_reply_to: req.in_reply_to.as_deref(),
            references: req.references.as_deref(),
        };
        let raw = build_rfc822(&outbound)?;

        let mut payload = json!({ "raw": encode_raw_message(&raw) });
        if let Some(thread_id) = &req.thread_id {
            payload["threadId"] = json!(thread_id);
        }

        let url = format!("{}/users/me/messages/send", self.base_url);
        let res = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;
        let res = check_status(res)?;
        let text = res.text().await?;
        let sent: SendResponse = serde_json::from_str(&text)?;

        tracing::info!(message_id = %sent.id, "message sent");

        Ok(SendResult {
            id: sent.id,
            thread_id: sent.thread_id,
        })
    }

    async fn list_labels(&self, token: &str) -> Result<Vec<Label>, AppError> {
        let url = format!("{}/users/me/labels", self.base_url);
        let response: ListLabelsResponse = self.get_json(token, &url).await?;

        Ok(response
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|l: GmailLabel| Label {
                id: l.id,
                name: l.name,
                label_type: l.label_type,
            })
            .collect())
    }

    async fn get_profile(&self, token: &str) -> Result<Profile, AppError> {
        let profile = self.fetch_profile(token).await?;
        Ok(Profile {
            email_address: profile.email_address,
            provider: "gmail".to_string(),
            messages_total: profile.messages_total,
        })
    }
}

// --- Helpers ---

/// Map provider auth rejections to the Authentication variant; any
/// other non-success status stays a Transport error.
fn check_status(res: reqwest::Response) -> Result<reqwest::Response, AppError> {
    match res.status() {
        s if s.is_success() => Ok(res),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Authentication(
            "mail provider rejected the access token".to_string(),
        )),
        _ => Err(AppError::Transport(res.error_for_status().unwrap_err())),
    }
}

fn message_view(msg: &GmailMessage) -> MessageView {
    let payload = msg.payload.as_ref();
    let header = |name: &str| payload.and_then(|p| p.header(name)).map(str::to_string);

    MessageView {
        id: msg.id.clone(),
        thread_id: msg.thread_id.clone(),
        subject: header("Subject"),
        from: header("From"),
        to: header("To"),
        cc: header("Cc"),
        bcc: header("Bcc"),
        date: header("Date"),
        internal_date: msg.internal_date.clone(),
        message_id: header("Message-ID"),
        references: header("References"),
        snippet: msg
            .snippet
            .as_deref()
            .map(decode_snippet)
            .unwrap_or_default(),
        body: payload.map(extract_body).unwrap_or_default(),
    }
}

fn header_of(msg: &GmailMessage, name: &str) -> Option<String> {
    msg.payload.as_ref()?.header(name).map(str::to_string)
}

fn envelope_of(msg: &GmailMessage) -> MessageEnvelope {
    MessageEnvelope {
        id: msg.id.clone(),
        subject: header_of(msg, "Subject"),
        from: header_of(msg, "From"),
        date: header_of(msg, "Date"),
        unread: msg
            .label_ids
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|l| l == "UNREAD"),
    }
}

/// Gmail snippets arrive with HTML entities pre-escaped.
fn decode_snippet(snippet: &str) -> String {
    html_escape::decode_html_entities(snippet).into_owned()
}
