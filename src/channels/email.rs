//! Email adapter with a stub transport.
//!
//! There is no live mail backend in this implementation: sends compose the
//! message, log it, and return a synthetic `{"success", "messageId"}`
//! receipt. The dispatch contract (subject handling, read acks) is real and
//! tested; only the wire is stubbed.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{ChannelAdapter, ChannelError, Delivery, Platform, SendOptions};

/// Subject used when the caller does not provide one.
pub const DEFAULT_SUBJECT: &str = "No Subject";

/// Stub-transport email adapter.
pub struct EmailAdapter {
    from_address: String,
    reply_to: Option<String>,
}

impl EmailAdapter {
    /// Create an adapter sending from the given address.
    pub fn new(from_address: String, reply_to: Option<String>) -> Self {
        Self {
            from_address,
            reply_to,
        }
    }
}

// ---------------------------------------------------------------------------
// Composition (pub for wire-format testing)
// ---------------------------------------------------------------------------

/// Compose the outbound email payload.
///
/// An absent subject falls back to [`DEFAULT_SUBJECT`]; `reply_to` is
/// included only when configured.
#[doc(hidden)]
pub fn compose_payload(
    from: &str,
    reply_to: Option<&str>,
    to: &str,
    subject: Option<&str>,
    body: &str,
) -> Value {
    let mut payload = serde_json::json!({
        "from": from,
        "to": to,
        "subject": subject.unwrap_or(DEFAULT_SUBJECT),
        "body": body,
    });
    if let Some(reply_to) = reply_to {
        payload["replyTo"] = Value::String(reply_to.to_owned());
    }
    payload
}

// ---------------------------------------------------------------------------
// Trait impl
// ---------------------------------------------------------------------------

#[async_trait]
impl ChannelAdapter for EmailAdapter {
    fn platform(&self) -> Platform {
        Platform::Email
    }

    fn supports_read_receipts(&self) -> bool {
        true
    }

    async fn send_text(
        &self,
        recipient: &str,
        body: &str,
        options: &SendOptions,
    ) -> Result<Delivery, ChannelError> {
        let payload = compose_payload(
            &self.from_address,
            self.reply_to.as_deref(),
            recipient,
            options.subject.as_deref(),
            body,
        );
        debug!(to = recipient, subject = %payload["subject"], "email composed (stub transport)");
        Ok(Delivery::synthetic(Platform::Email))
    }

    async fn mark_read(
        &self,
        message_id: &str,
        _sender_id: &str,
    ) -> Result<Delivery, ChannelError> {
        debug!(message_id, "email marked read (stub transport)");
        Ok(Delivery::synthetic(Platform::Email))
    }

    async fn list_conversations(&self) -> Result<Delivery, ChannelError> {
        Ok(Delivery::empty_listing(Platform::Email))
    }
}
