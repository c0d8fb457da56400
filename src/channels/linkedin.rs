//! LinkedIn messaging adapter (REST API v2).
//!
//! Text only: LinkedIn exposes neither a media send nor a read receipt
//! through this surface, so both keep their unsupported defaults.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{
    check_http_response, finish, http_client, ChannelAdapter, ChannelError, Delivery, Operation,
    Platform, SendOptions,
};

/// LinkedIn REST API base.
const LINKEDIN_API_BASE: &str = "https://api.linkedin.com/v2";

/// Protocol version header required by the v2 REST API.
const RESTLI_VERSION: &str = "2.0.0";

/// LinkedIn messaging adapter bound to one member access token.
pub struct LinkedInAdapter {
    client: reqwest::Client,
    access_token: String,
}

impl LinkedInAdapter {
    /// Create an adapter for the given access token.
    pub fn new(access_token: String) -> Self {
        Self {
            client: http_client(),
            access_token,
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(&self.access_token)
            .header("X-Restli-Protocol-Version", RESTLI_VERSION)
    }
}

/// Build the messages envelope.
///
/// The recipient is a member URN; subject is included only when provided.
#[doc(hidden)]
pub fn build_text_payload(recipient_urn: &str, subject: Option<&str>, body: &str) -> Value {
    let mut payload = serde_json::json!({
        "recipients": [recipient_urn],
        "body": body,
    });
    if let Some(subject) = subject {
        payload["subject"] = Value::String(subject.to_owned());
    }
    payload
}

#[async_trait]
impl ChannelAdapter for LinkedInAdapter {
    fn platform(&self) -> Platform {
        Platform::Linkedin
    }

    async fn send_text(
        &self,
        recipient: &str,
        body: &str,
        options: &SendOptions,
    ) -> Result<Delivery, ChannelError> {
        let payload = build_text_payload(recipient, options.subject.as_deref(), body);
        let url = format!("{LINKEDIN_API_BASE}/messages");
        let result = async {
            let response = self.request(self.client.post(&url)).json(&payload).send().await?;
            check_http_response(response).await
        }
        .await;
        if result.is_ok() {
            debug!(to = recipient, "LinkedIn message sent");
        }
        finish(Platform::Linkedin, Operation::SendText, result)
    }

    async fn list_conversations(&self) -> Result<Delivery, ChannelError> {
        let url = format!("{LINKEDIN_API_BASE}/conversations");
        let result = async {
            let response = self.request(self.client.get(&url)).send().await?;
            check_http_response(response).await
        }
        .await;
        finish(Platform::Linkedin, Operation::ListConversations, result)
    }
}
