//! Telegram Bot API adapter.
//!
//! Sends outbound messages via `sendMessage`, `sendPhoto`, and
//! `sendDocument`; the read path polls `getUpdates`. Telegram has no read
//! receipt concept, so `mark_read` keeps the unsupported default.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{
    check_http_response, finish, http_client, validate_media_url, ChannelAdapter, ChannelError,
    Delivery, MediaKind, Operation, Platform, SendOptions,
};

/// Bot API host; the bot token is appended as a path segment.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Parse mode applied to all outbound text.
const PARSE_MODE: &str = "HTML";

/// Telegram Bot API adapter bound to one bot token.
pub struct TelegramAdapter {
    client: reqwest::Client,
    bot_token: String,
}

impl TelegramAdapter {
    /// Create an adapter for the given bot token.
    pub fn new(bot_token: String) -> Self {
        Self {
            client: http_client(),
            bot_token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{TELEGRAM_API_BASE}/bot{}/{method}", self.bot_token)
    }

    async fn call(&self, method: &str, payload: &Value) -> Result<Value, ChannelError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await?;
        check_http_response(response).await
    }
}

// ---------------------------------------------------------------------------
// Envelope builders (pub for wire-format testing)
// ---------------------------------------------------------------------------

/// Bot API method name for a media kind: photos go through `sendPhoto`,
/// everything else through `sendDocument`.
#[doc(hidden)]
pub fn media_method(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "sendPhoto",
        MediaKind::Document => "sendDocument",
    }
}

/// Build the `sendMessage` payload.
#[doc(hidden)]
pub fn build_text_payload(chat_id: &str, text: &str) -> Value {
    serde_json::json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": PARSE_MODE,
    })
}

/// Build the `sendPhoto` / `sendDocument` payload.
///
/// The media URL lands under `photo` or `document` depending on the kind;
/// caption is omitted when absent.
#[doc(hidden)]
pub fn build_media_payload(
    chat_id: &str,
    media_url: &str,
    caption: Option<&str>,
    kind: MediaKind,
) -> Value {
    let media_key = match kind {
        MediaKind::Image => "photo",
        MediaKind::Document => "document",
    };
    let mut payload = serde_json::json!({
        "chat_id": chat_id,
        media_key: media_url,
    });
    if let Some(caption) = caption {
        payload["caption"] = Value::String(caption.to_owned());
    }
    payload
}

// ---------------------------------------------------------------------------
// Trait impl
// ---------------------------------------------------------------------------

#[async_trait]
impl ChannelAdapter for TelegramAdapter {
    fn platform(&self) -> Platform {
        Platform::Telegram
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
        let result = self.call("sendMessage", &payload).await;
        if result.is_ok() {
            debug!(chat_id = recipient, "Telegram text sent");
        }
        finish(Platform::Telegram, Operation::SendText, result)
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
        let result = self.call(media_method(kind), &payload).await;
        if result.is_ok() {
            debug!(chat_id = recipient, ?kind, "Telegram media sent");
        }
        finish(Platform::Telegram, Operation::SendMedia, result)
    }

    async fn list_conversations(&self) -> Result<Delivery, ChannelError> {
        let result = async {
            let response = self.client.get(self.method_url("getUpdates")).send().await?;
            check_http_response(response).await
        }
        .await;
        finish(Platform::Telegram, Operation::ListConversations, result)
    }
}
