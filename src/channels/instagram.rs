//! Instagram Messaging adapter (Graph API).
//!
//! Uses the `recipient` / `message` envelope shared with Messenger; the
//! access token travels as a query parameter. Instagram exposes no read
//! receipt endpoint here, so `mark_read` keeps the unsupported default.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{
    check_http_response, finish, http_client, validate_media_url, ChannelAdapter, ChannelError,
    Delivery, MediaKind, Operation, Platform, SendOptions,
};

/// Instagram Graph API base.
const INSTAGRAM_API_BASE: &str = "https://graph.instagram.com/v18.0";

/// Instagram Messaging adapter bound to one access token.
pub struct InstagramAdapter {
    client: reqwest::Client,
    access_token: String,
}

impl InstagramAdapter {
    /// Create an adapter for the given access token.
    pub fn new(access_token: String) -> Self {
        Self {
            client: http_client(),
            access_token,
        }
    }

    async fn post_messages(&self, payload: &Value) -> Result<Value, ChannelError> {
        let url = format!("{INSTAGRAM_API_BASE}/me/messages");
        let response = self
            .client
            .post(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .json(payload)
            .send()
            .await?;
        check_http_response(response).await
    }
}

// ---------------------------------------------------------------------------
// Envelope builders (pub for wire-format testing)
// ---------------------------------------------------------------------------

/// Build the text message envelope.
#[doc(hidden)]
pub fn build_text_payload(recipient_id: &str, text: &str) -> Value {
    serde_json::json!({
        "recipient": { "id": recipient_id },
        "message": { "text": text },
    })
}

/// Build the attachment envelope.
///
/// Images use the `image` attachment type; everything else is sent as a
/// `file`. Messenger-style attachments carry no caption field.
#[doc(hidden)]
pub fn build_media_payload(recipient_id: &str, media_url: &str, kind: MediaKind) -> Value {
    let attachment_type = match kind {
        MediaKind::Image => "image",
        MediaKind::Document => "file",
    };
    serde_json::json!({
        "recipient": { "id": recipient_id },
        "message": {
            "attachment": {
                "type": attachment_type,
                "payload": { "url": media_url },
            },
        },
    })
}

// ---------------------------------------------------------------------------
// Trait impl
// ---------------------------------------------------------------------------

#[async_trait]
impl ChannelAdapter for InstagramAdapter {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn supports_media(&self) -> bool {
        true
    }

    async fn send_text(
        &self,
        recipient: &str,
        body: &str,
        _options: &SendOptions,
    ) -> Result<Delivery, ChannelError> {
        let payload = build_text_payload(recipient, body);
        let result = self.post_messages(&payload).await;
        if result.is_ok() {
            debug!(to = recipient, "Instagram text sent");
        }
        finish(Platform::Instagram, Operation::SendText, result)
    }

    async fn send_media(
        &self,
        recipient: &str,
        media_url: &str,
        _caption: Option<&str>,
        kind: MediaKind,
    ) -> Result<Delivery, ChannelError> {
        validate_media_url(media_url)?;
        let payload = build_media_payload(recipient, media_url, kind);
        let result = self.post_messages(&payload).await;
        if result.is_ok() {
            debug!(to = recipient, ?kind, "Instagram media sent");
        }
        finish(Platform::Instagram, Operation::SendMedia, result)
    }

    async fn list_conversations(&self) -> Result<Delivery, ChannelError> {
        let url = format!("{INSTAGRAM_API_BASE}/me/conversations");
        let result = async {
            let response = self
                .client
                .get(&url)
                .query(&[("access_token", self.access_token.as_str())])
                .send()
                .await?;
            check_http_response(response).await
        }
        .await;
        finish(Platform::Instagram, Operation::ListConversations, result)
    }
}
