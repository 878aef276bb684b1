use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A display body partitioned into fresh content and quoted history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedBody {
    pub reply: Option<String>,
    pub quote: Option<String>,
}

static BLOCKQUOTE_CITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<blockquote type="cite""#).expect("valid regex"));
static GMAIL_QUOTE_DIV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<div class="gmail_quote">"#).expect("valid regex"));
static WROTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^On .* wrote:\s*$").expect("valid regex"));

/// Split a resolved body into new content and quoted history.
///
/// Markers are tried in a fixed order, first match wins:
/// 1. `<blockquote type="cite"` (Apple Mail and friends)
/// 2. `<div class="gmail_quote">`
/// 3. a line matching `On .* wrote:`
/// 4. the first newline immediately followed by `>`
/// 5. a body that itself starts with `>` is all quote
///
/// With no marker the whole body is the reply. The order and its known
/// misfires on unusual quoting conventions are load-bearing for content
/// that was already displayed with these rules; do not reorder.
pub fn split_reply_quote(body: &str) -> ExtractedBody {
    if let Some(m) = BLOCKQUOTE_CITE.find(body) {
        return split_at(body, m.start());
    }
    if let Some(m) = GMAIL_QUOTE_DIV.find(body) {
        return split_at(body, m.start());
    }
    if let Some(m) = WROTE_LINE.find(body) {
        return split_at(body, m.start());
    }
    if let Some(pos) = body.find("\n>") {
        // Quote keeps its leading newline
        return split_at(body, pos);
    }
    if body.starts_with('>') {
        return ExtractedBody {
            reply: None,
            quote: Some(body.to_string()),
        };
    }
    ExtractedBody {
        reply: Some(body.to_string()),
        quote: None,
    }
}

/// Everything before `pos` is reply, everything from `pos` on is quote.
/// A reply that trims to nothing re-absorbs the whole body: a message
/// that is entirely quoted history is shown uncollapsed.
fn split_at(body: &str, pos: usize) -> ExtractedBody {
    let reply = body[..pos].trim();
    if reply.is_empty() {
        return ExtractedBody {
            reply: Some(body.to_string()),
            quote: None,
        };
    }
    ExtractedBody {
        reply: Some(reply.to_string()),
        quote: Some(body[pos..].to_string()),
    }
}
