use super::encoding::decode_body_data;
use super::model::MessagePart;

/// Which rendering won the body selection. Plain bodies are wrapped in
/// a preformatted block for display, but only after reply/quote
/// splitting has run over the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Html,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBody {
    pub content: String,
    pub kind: BodyKind,
}

impl ResolvedBody {
    /// Display form: HTML as-is, plain text inside a `<pre>` block so
    /// whitespace survives HTML rendering.
    pub fn into_display(self) -> String {
        match self.kind {
            BodyKind::Html => self.content,
            BodyKind::Plain => wrap_preformatted(&self.content),
        }
    }
}

pub fn wrap_preformatted(text: &str) -> String {
    format!("<pre>{}</pre>", text)
}

/// Select the best displayable body from a message part tree.
///
/// `multipart/alternative` children are mutually exclusive renderings
/// of the same content: a decodable `text/html` child always wins over
/// `text/plain`, regardless of child order. Every other `multipart/*`
/// container recurses depth-first, left to right, and returns the
/// first hit. A part whose data fails to decode counts as absent and
/// the scan moves on.
pub fn resolve_body(part: &MessagePart) -> Option<ResolvedBody> {
    let mime_type = part.mime_type.as_deref().unwrap_or("");

    if mime_type.eq_ignore_ascii_case("multipart/alternative") {
        let children = part.parts.as_deref().unwrap_or(&[]);
        if let Some(content) = first_decodable(children, "text/html") {
            return Some(ResolvedBody {
                content,
                kind: BodyKind::Html,
            });
        }
        return first_decodable(children, "text/plain").map(|content| ResolvedBody {
            content,
            kind: BodyKind::Plain,
        });
    }

    if mime_type
        .get(..10)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("multipart/"))
    {
        return part
            .parts
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find_map(resolve_body);
    }

    if mime_type.eq_ignore_ascii_case("text/html") {
        return decode_part(part).map(|content| ResolvedBody {
            content,
            kind: BodyKind::Html,
        });
    }

    if mime_type.eq_ignore_ascii_case("text/plain") {
        return decode_part(part).map(|content| ResolvedBody {
            content,
            kind: BodyKind::Plain,
        });
    }

    None
}

/// First direct child of the given type whose payload decodes to
/// non-empty text.
fn first_decodable(children: &[MessagePart], mime_type: &str) -> Option<String> {
    children
        .iter()
        .filter(|p| {
            p.mime_type
                .as_deref()
                .is_some_and(|m| m.eq_ignore_ascii_case(mime_type))
        })
        .find_map(decode_part)
}

fn decode_part(part: &MessagePart) -> Option<String> {
    let body = part.body.as_ref()?;
    // Attachment payloads are served out-of-line, never inline content
    if body.attachment_id.is_some() {
        return None;
    }
    let data = body.data.as_deref()?;
    decode_body_data(data).filter(|s| !s.is_empty())
}
