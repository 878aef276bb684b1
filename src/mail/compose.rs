use uuid::Uuid;

use crate::error::AppError;

/// Compose-time fields for an outbound message. `in_reply_to` and
/// `references` carry the replied-to message's Message-ID and prior
/// References header values when replying.
#[derive(Debug, Clone, Default)]
pub struct OutboundMessage<'a> {
    pub from: &'a str,
    pub to: &'a [String],
    pub cc: &'a [String],
    pub bcc: &'a [String],
    pub subject: &'a str,
    pub body: &'a str,
    pub in_reply_to: Option<&'a str>,
    pub references: Option<&'a str>,
}

/// Build the transmittable RFC822 text: header block, blank line,
/// plain-text body. CRLF line endings throughout the header block.
pub fn build_rfc822(msg: &OutboundMessage) -> Result<String, AppError> {
    ensure_header_safe("From", msg.from)?;
    for addr in msg.to.iter().chain(msg.cc).chain(msg.bcc) {
        ensure_header_safe("recipient", addr)?;
    }
    ensure_header_safe("Subject", msg.subject)?;
    if let Some(in_reply_to) = msg.in_reply_to {
        ensure_header_safe("In-Reply-To", in_reply_to)?;
    }
    if let Some(references) = msg.references {
        ensure_header_safe("References", references)?;
    }

    let mut out = String::new();
    out.push_str(&format!("From: {}\r\n", msg.from));
    out.push_str(&format!("To: {}\r\n", msg.to.join(", ")));
    if !msg.cc.is_empty() {
        out.push_str(&format!("Cc: {}\r\n", msg.cc.join(", ")));
    }
    if !msg.bcc.is_empty() {
        out.push_str(&format!("Bcc: {}\r\n", msg.bcc.join(", ")));
    }
    out.push_str(&format!("Subject: {}\r\n", msg.subject));
    out.push_str(&format!("Message-ID: {}\r\n", generate_message_id(msg.from)));
    if let Some(in_reply_to) = msg.in_reply_to {
        out.push_str(&format!("In-Reply-To: {}\r\n", in_reply_to));
        out.push_str(&format!(
            "References: {}\r\n",
            build_references(msg.references, in_reply_to)
        ));
    }
    out.push_str("MIME-Version: 1.0\r\n");
    out.push_str("Content-Type: text/plain; charset=utf-8\r\n");
    out.push_str("\r\n");
    out.push_str(msg.body);

    Ok(out)
}

/// Append the replied-to Message-ID to any prior References value,
/// space separated, preserving the provider's threading semantics.
fn build_references(prior: Option<&str>, in_reply_to: &str) -> String {
    match prior {
        Some(refs) if !refs.trim().is_empty() => format!("{} {}", refs.trim(), in_reply_to),
        _ => in_reply_to.to_string(),
    }
}

fn generate_message_id(from: &str) -> String {
    let domain = from
        .rsplit_once('@')
        .map(|(_, domain)| domain.trim_end_matches('>'))
        .filter(|d| !d.is_empty())
        .unwrap_or("mail.invalid");
    format!("<{}@{}>", Uuid::new_v4(), domain)
}

/// A header value carrying a line break cannot be serialized into the
/// header block without changing the message.
fn ensure_header_safe(name: &str, value: &str) -> Result<(), AppError> {
    if value.contains('\r') || value.contains('\n') {
        return Err(AppError::Encoding(format!(
            "{} value contains a line break",
            name
        )));
    }
    Ok(())
}
