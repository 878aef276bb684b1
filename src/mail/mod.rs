pub mod body;
pub mod compose;
pub mod encoding;
pub mod model;
pub mod quote;

use body::{resolve_body, wrap_preformatted, BodyKind};
use model::MessagePart;
use quote::{split_reply_quote, ExtractedBody};

/// Full display pipeline for one message payload: pick the best body,
/// split it into reply and quoted history, then wrap plain-text halves
/// in preformatted markup. Both halves come out HTML-renderable.
pub fn extract_body(payload: &MessagePart) -> ExtractedBody {
    let Some(resolved) = resolve_body(payload) else {
        return ExtractedBody::default();
    };
    let split = split_reply_quote(&resolved.content);
    match resolved.kind {
        BodyKind::Html => split,
        BodyKind::Plain => ExtractedBody {
            reply: split.reply.map(|r| wrap_preformatted(&r)),
            quote: split.quote.map(|q| wrap_preformatted(&q)),
        },
    }
}
