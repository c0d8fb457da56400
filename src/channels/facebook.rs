//! Facebook Messenger Send API adapter (Graph API v18.0).
//!
//! Shares the `recipient` / `message` envelope with Instagram but adds
//! `messaging_type` on sends and a `mark_seen` sender action for read
//! receipts, keyed by the sender id rather than a message id.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{
    check_http_response, finish, http_client, validate_media_url, ChannelAdapter, ChannelError,
    Delivery, MediaKind, Operation, Platform, SendOptions,
};

/// Graph API base for Messenger endpoints.
const GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0";

/// Facebook Messenger adapter bound to one page access token.
pub struct FacebookAdapter {
    client: reqwest::Client,
    page_access_token: String,
}

impl FacebookAdapter {
    /// Create an adapter for the given page access token.
    pub fn new(page_access_token: String) -> Self {
        Self {
            client: http_client(),
            page_access_token,
        }
    }

    async fn post_messages(&self, payload: &Value) -> Result<Value, ChannelError> {
        let url = format!("{GRAPH_API_BASE}/me/messages");
        let response = self
            .client
            .post(&url)
            .query(&[("access_token", self.page_access_token.as_str())])
            .json(payload)
            .send()
            .await?;
        check_http_response(response).await
    }
}

// ---------------------------------------------------------------------------
// Envelope builders (pub for wire-format testing)
// ---------------------------------------------------------------------------

/// Build the Send API text envelope.
#[doc(hidden)]
pub fn build_text_payload(recipient_id: &str, text: &str) -> Value {
    serde_json::json!({
        "recipient": { "id": recipient_id },
        "message": { "text": text },
        "messaging_type": "RESPONSE",
    })
}

/// Build the Send API attachment envelope.
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
        "messaging_type": "RESPONSE",
    })
}

/// Build the `mark_seen` sender-action envelope.
///
/// Messenger read receipts are keyed by the conversation partner's id, not
/// a message id.
#[doc(hidden)]
pub fn build_mark_seen_payload(sender_id: &str) -> Value {
    serde_json::json!({
        "recipient": { "id": sender_id },
        "sender_action": "mark_seen",
    })
}

// ---------------------------------------------------------------------------
// Trait impl
// ---------------------------------------------------------------------------

#[async_trait]
impl ChannelAdapter for FacebookAdapter {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    fn supports_media(&self) -> bool {
        true
    }

    fn supports_read_receipts(&self) -> bool {
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
            debug!(to = recipient, "Facebook text sent");
        }
        finish(Platform::Facebook, Operation::SendText, result)
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
            debug!(to = recipient, ?kind, "Facebook media sent");
        }
        finish(Platform::Facebook, Operation::SendMedia, result)
    }

    async fn mark_read(
        &self,
        _message_id: &str,
        sender_id: &str,
    ) -> Result<Delivery, ChannelError> {
        let payload = build_mark_seen_payload(sender_id);
        let result = self.post_messages(&payload).await;
        finish(Platform::Facebook, Operation::MarkRead, result)
    }

    async fn list_conversations(&self) -> Result<Delivery, ChannelError> {
        let url = format!("{GRAPH_API_BASE}/me/conversations");
        let result = async {
            let response = self
                .client
                .get(&url)
                .query(&[("access_token", self.page_access_token.as_str())])
                .send()
                .await?;
            check_http_response(response).await
        }
        .await;
        finish(Platform::Facebook, Operation::ListConversations, result)
    }
}
