use serde::Deserialize;

// Wire shapes for the Gmail v1 REST API. Only the fields this service
// reads are declared; unknown fields are ignored on deserialize.

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadListResponse {
    pub threads: Option<Vec<ThreadRef>>,
    pub next_page_token: Option<String>,
    pub result_size_estimate: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRef {
    pub id: String,
}

/// A conversation as returned by `threads.get`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmailThread {
    pub id: String,
    pub messages: Option<Vec<GmailMessage>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmailMessage {
    pub id: String,
    pub thread_id: String,
    pub label_ids: Option<Vec<String>>,
    pub snippet: Option<String>,
    pub internal_date: Option<String>,
    pub payload: Option<MessagePart>,
}

/// One node of the MIME tree.
///
/// Gmail uses the same shape for the top-level payload and for nested
/// parts: a part is either a leaf carrying `body.data` or a container
/// carrying `parts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    pub mime_type: Option<String>,
    pub headers: Option<Vec<Header>>,
    pub body: Option<PartBody>,
    pub parts: Option<Vec<MessagePart>>,
}

impl MessagePart {
    /// Look up a header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_deref()?
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartBody {
    pub attachment_id: Option<String>,
    // Base64URL encoded
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLabelsResponse {
    pub labels: Option<Vec<GmailLabel>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmailLabel {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub label_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmailProfile {
    pub email_address: String,
    pub messages_total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub id: String,
    pub thread_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_list_response_parses_camel_case() {
        let json = r#"{
            "threads": [{"id": "t1", "snippet": "hi"}],
            "nextPageToken": "ABC123",
            "resultSizeEstimate": 42
        }"#;
        let parsed: ThreadListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.threads.unwrap()[0].id, "t1");
        assert_eq!(parsed.next_page_token.as_deref(), Some("ABC123"));
        assert_eq!(parsed.result_size_estimate, Some(42));
    }

    #[test]
    fn message_part_parses_nested_parts() {
        let json = r#"{
            "mimeType": "multipart/alternative",
            "parts": [
                {"mimeType": "text/plain", "body": {"size": 2, "data": "aGk"}},
                {"mimeType": "text/html", "body": {"size": 9, "data": "PGI-aGk8L2I-"}}
            ]
        }"#;
        let part: MessagePart = serde_json::from_str(json).unwrap();
        let children = part.parts.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].mime_type.as_deref(), Some("text/html"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let json = r#"{
            "mimeType": "text/plain",
            "headers": [{"name": "SUBJECT", "value": "Hello"}]
        }"#;
        let part: MessagePart = serde_json::from_str(json).unwrap();
        assert_eq!(part.header("subject"), Some("Hello"));
        assert_eq!(part.header("Message-ID"), None);
    }
}
