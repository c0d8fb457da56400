//! SMS adapter with a stub transport.
//!
//! Like email, there is no live SMS backend here: sends log the composed
//! message and return a synthetic receipt. Text only — no media, no read
//! receipts.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{ChannelAdapter, ChannelError, Delivery, Platform, SendOptions};

/// Stub-transport SMS adapter.
pub struct SmsAdapter {
    from_number: String,
}

impl SmsAdapter {
    /// Create an adapter sending from the given number.
    ///
    /// The API key gates bootstrap (no key, no adapter) but the stub
    /// transport itself has no use for it beyond logging its presence.
    pub fn new(api_key: String, from_number: String) -> Self {
        debug!(
            key_present = !api_key.is_empty(),
            from = %from_number,
            "SMS adapter configured (stub transport)"
        );
        Self { from_number }
    }
}

/// Compose the outbound SMS payload.
#[doc(hidden)]
pub fn compose_payload(from: &str, to: &str, body: &str) -> Value {
    serde_json::json!({
        "from": from,
        "to": to,
        "body": body,
    })
}

#[async_trait]
impl ChannelAdapter for SmsAdapter {
    fn platform(&self) -> Platform {
        Platform::Sms
    }

    async fn send_text(
        &self,
        recipient: &str,
        body: &str,
        _options: &SendOptions,
    ) -> Result<Delivery, ChannelError> {
        let payload = compose_payload(&self.from_number, recipient, body);
        debug!(to = %payload["to"], "SMS composed (stub transport)");
        Ok(Delivery::synthetic(Platform::Sms))
    }

    async fn list_conversations(&self) -> Result<Delivery, ChannelError> {
        Ok(Delivery::empty_listing(Platform::Sms))
    }
}
