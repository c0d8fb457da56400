//! WhatsApp Cloud API adapter (Graph API v18.0).

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{
    check_http_response, finish, http_client, validate_media_url, ChannelAdapter, ChannelError,
    Delivery, MediaKind, Operation, Platform, SendOptions,
};

/// Graph API base shared by WhatsApp Cloud endpoints.
const GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0";

/// WhatsApp Cloud API adapter.
///
/// Bound to one business phone number; all calls go to
/// `{GRAPH_API_BASE}/{phone_number_id}/...` with bearer-token auth.
pub struct WhatsAppAdapter {
    client: reqwest::Client,
    access_token: String,
    phone_number_id: String,
}

impl WhatsAppAdapter {
    /// Create an adapter bound to a phone number id and access token.
    pub fn new(access_token: String, phone_number_id: String) -> Self {
        Self {
            client: http_client(),
            access_token,
            phone_number_id,
        }
    }

    fn messages_url(&self) -> String {
        format!("{GRAPH_API_BASE}/{}/messages", self.phone_number_id)
    }

    async fn post_messages(&self, payload: &Value) -> Result<Value, ChannelError> {
        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.access_token)
            .json(payload)
            .send()
            .await?;
        check_http_response(response).await
    }
}

// ---------------------------------------------------------------------------
// Envelope builders (pub for wire-format testing)
// ---------------------------------------------------------------------------

/// Build the Cloud API text message envelope.
#[doc(hidden)]
pub fn build_text_payload(to: &str, body: &str) -> Value {
    serde_json::json!({
        "messaging_product": "whatsapp",
        "recipient_type": "individual",
        "to": to,
        "type": "text",
        "text": { "body": body },
    })
}

/// Build the Cloud API media envelope.
///
/// The `type` field and the type-keyed media object follow the media kind:
/// `"image"` for photos, `"document"` otherwise. Caption is omitted when
/// absent.
#[doc(hidden)]
pub fn build_media_payload(
    to: &str,
    media_url: &str,
    caption: Option<&str>,
    kind: MediaKind,
) -> Value {
    let type_key = match kind {
        MediaKind::Image => "image",
        MediaKind::Document => "document",
    };
    let mut media_object = serde_json::json!({ "link": media_url });
    if let Some(caption) = caption {
        media_object["caption"] = Value::String(caption.to_owned());
    }
    serde_json::json!({
        "messaging_product": "whatsapp",
        "recipient_type": "individual",
        "to": to,
        "type": type_key,
        type_key: media_object,
    })
}

/// Build the Cloud API read-status envelope.
#[doc(hidden)]
pub fn build_read_payload(message_id: &str) -> Value {
    serde_json::json!({
        "messaging_product": "whatsapp",
        "status": "read",
        "message_id": message_id,
    })
}

// ---------------------------------------------------------------------------
// Trait impl
// ---------------------------------------------------------------------------

#[async_trait]
impl ChannelAdapter for WhatsAppAdapter {
    fn platform(&self) -> Platform {
        Platform::Whatsapp
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
            debug!(to = recipient, "WhatsApp text sent");
        }
        finish(Platform::Whatsapp, Operation::SendText, result)
    }

    async fn send_media(
        &self,
        recipient: &str,
        media_url: &str,
        caption: Option<&str>,
        kind: MediaKind,
    ) -> Result<Delivery, ChannelError> {
        validate_media_url(media_url)?;
        let payload = build_media_payload(recipient, media_url, caption, kind);
        let result = self.post_messages(&payload).await;
        if result.is_ok() {
            debug!(to = recipient, ?kind, "WhatsApp media sent");
        }
        finish(Platform::Whatsapp, Operation::SendMedia, result)
    }

    async fn mark_read(
        &self,
        message_id: &str,
        _sender_id: &str,
    ) -> Result<Delivery, ChannelError> {
        let payload = build_read_payload(message_id);
        let result = self.post_messages(&payload).await;
        finish(Platform::Whatsapp, Operation::MarkRead, result)
    }

    async fn list_conversations(&self) -> Result<Delivery, ChannelError> {
        let url = format!("{GRAPH_API_BASE}/{}/conversations", self.phone_number_id);
        let result = async {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.access_token)
                .send()
                .await?;
            check_http_response(response).await
        }
        .await;
        finish(Platform::Whatsapp, Operation::ListConversations, result)
    }
}
