//! Channel adapter abstraction layer.
//!
//! Defines the [`ChannelAdapter`] trait and the shared types used by all
//! platform adapters.
//!
//! Seven adapters are implemented:
//! - [`whatsapp::WhatsAppAdapter`] — WhatsApp Cloud API (Graph v18.0)
//! - [`telegram::TelegramAdapter`] — Telegram Bot API
//! - [`instagram::InstagramAdapter`] — Instagram Messaging (Graph)
//! - [`facebook::FacebookAdapter`] — Facebook Messenger Send API
//! - [`email::EmailAdapter`] — stub transport with synthetic receipts
//! - [`sms::SmsAdapter`] — stub transport with synthetic receipts
//! - [`linkedin::LinkedInAdapter`] — LinkedIn messaging API
//!
//! The [`crate::registry::ChannelRegistry`] routes generic send/media/read
//! calls to the adapter registered for each platform.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub mod email;
pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod sms;
pub mod telegram;
pub mod whatsapp;

/// HTTP connect timeout applied to every adapter client.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// HTTP request timeout applied to every adapter client.
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// A messaging platform this crate can dispatch to.
///
/// The set is closed: an unrecognized platform name fails at parse time, so
/// dispatch code never sees a platform outside this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// WhatsApp Cloud API.
    Whatsapp,
    /// Telegram Bot API.
    Telegram,
    /// Instagram Messaging.
    Instagram,
    /// Facebook Messenger.
    Facebook,
    /// Email transport.
    Email,
    /// SMS transport.
    Sms,
    /// LinkedIn messaging.
    Linkedin,
}

impl Platform {
    /// All platforms this crate knows about, in canonical order.
    pub const ALL: [Platform; 7] = [
        Platform::Whatsapp,
        Platform::Telegram,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Email,
        Platform::Sms,
        Platform::Linkedin,
    ];

    /// The lowercase identifier used in configuration and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Telegram => "telegram",
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Linkedin => "linkedin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "whatsapp" => Ok(Self::Whatsapp),
            "telegram" => Ok(Self::Telegram),
            "instagram" => Ok(Self::Instagram),
            "facebook" => Ok(Self::Facebook),
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "linkedin" => Ok(Self::Linkedin),
            other => Err(UnknownPlatform(other.to_owned())),
        }
    }
}

/// Error returned when parsing an unrecognized platform name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform '{0}', expected one of: whatsapp, telegram, instagram, facebook, email, sms, linkedin")]
pub struct UnknownPlatform(pub String);

/// The kind of media attached to an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// An inline image (photo path on platforms that distinguish).
    Image,
    /// Any other attachment, delivered as a document/file.
    Document,
}

impl MediaKind {
    /// Map a free-form kind string onto a media kind.
    ///
    /// `"image"` (case-insensitive) selects [`MediaKind::Image`]; every other
    /// value falls through to [`MediaKind::Document`].
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("image") {
            Self::Image
        } else {
            Self::Document
        }
    }
}

/// Per-call send options.
///
/// Only email consumes `subject` today; chat platforms ignore it.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Email subject line. Falls back to a placeholder when absent.
    pub subject: Option<String>,
}

/// An operation a caller can request from an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Plain text send.
    SendText,
    /// Media send (image or document).
    SendMedia,
    /// Read-receipt update.
    MarkRead,
    /// Conversation listing.
    ListConversations,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SendText => "send_text",
            Self::SendMedia => "send_media",
            Self::MarkRead => "mark_read",
            Self::ListConversations => "list_conversations",
        };
        f.write_str(name)
    }
}

/// The provider's response to a dispatched call.
///
/// The body is the raw decoded JSON from the provider, passed through
/// uninterpreted — callers inspect success/error fields themselves. Stub
/// transports synthesize a `{"success": true, "messageId": ...}` body.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// The platform that produced this response.
    pub platform: Platform,
    /// Raw decoded response body.
    pub body: Value,
}

impl Delivery {
    /// Wrap a provider response body.
    pub fn new(platform: Platform, body: Value) -> Self {
        Self { platform, body }
    }

    /// Synthesize a receipt for transports without a live backend.
    pub fn synthetic(platform: Platform) -> Self {
        Self {
            platform,
            body: serde_json::json!({
                "success": true,
                "messageId": uuid::Uuid::new_v4().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }),
        }
    }

    /// Synthesize an empty conversation listing for stub transports.
    pub fn empty_listing(platform: Platform) -> Self {
        Self {
            platform,
            body: serde_json::json!({ "items": [], "count": 0 }),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by adapters and the dispatch registry.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Dispatch was attempted for a platform with no registered adapter.
    /// Raised before any network attempt.
    #[error("no integration registered for platform '{platform}'")]
    NotRegistered {
        /// The platform that was requested.
        platform: Platform,
    },
    /// The platform is registered but does not implement this operation.
    #[error("operation '{operation}' not supported for platform '{platform}'")]
    Unsupported {
        /// The platform that was requested.
        platform: Platform,
        /// The operation the platform lacks.
        operation: Operation,
    },
    /// HTTP transport failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider responded with a non-success HTTP status.
    #[error("provider returned non-success status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        body: String,
    },
    /// Response did not decode as JSON.
    #[error("response parse error: {0}")]
    Parse(String),
    /// The supplied media URL is not a valid URL.
    #[error("invalid media url '{0}'")]
    InvalidMediaUrl(String),
}

// ---------------------------------------------------------------------------
// HTTP helpers (shared by all adapters)
// ---------------------------------------------------------------------------

/// Build the reqwest client used by live adapters.
///
/// Connect and request timeouts are enforced here — this layer adds no
/// timeout of its own above the HTTP client.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "failed to build HTTP client with timeouts, using default");
            reqwest::Client::default()
        })
}

/// Check HTTP response status, then decode the body as JSON.
///
/// The status check happens before any parse attempt: a non-2xx response
/// becomes [`ChannelError::HttpStatus`] with a sanitized body and the body is
/// never interpreted as a provider payload.
///
/// # Errors
///
/// Returns `ChannelError::Http` on transport failure, `HttpStatus` on
/// non-2xx, `Parse` when the body is not valid JSON.
pub async fn check_http_response(response: reqwest::Response) -> Result<Value, ChannelError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ChannelError::HttpStatus {
            status: status.as_u16(),
            body: sanitize_error_body(&body),
        });
    }
    serde_json::from_str(&body).map_err(|e| ChannelError::Parse(e.to_string()))
}

/// Collapse whitespace, redact token-like substrings, and truncate a raw
/// error body before it reaches logs or error values.
pub(crate) fn sanitize_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sanitized = collapsed;
    for pattern in [
        r"EAA[A-Za-z0-9]{20,}",
        r"\b\d{6,}:[A-Za-z0-9_\-]{30,}\b",
        r"Bearer [A-Za-z0-9._\-]{16,}",
        r"xoxb-[A-Za-z0-9\-]{20,}",
    ] {
        if let Ok(regex) = Regex::new(pattern) {
            sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
        }
    }

    const MAX_ERROR_BODY_CHARS: usize = 256;
    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}

/// Log a failed channel operation with platform and operation context.
///
/// Adapters call this on every propagated failure so transport errors are
/// never silently dropped between the wire and the caller.
pub(crate) fn log_failure(platform: Platform, operation: Operation, error: &ChannelError) {
    warn!(%platform, %operation, %error, "channel operation failed");
}

/// Wrap a raw provider result into a [`Delivery`], logging failures with
/// platform and operation context before propagating them.
pub(crate) fn finish(
    platform: Platform,
    operation: Operation,
    result: Result<Value, ChannelError>,
) -> Result<Delivery, ChannelError> {
    match result {
        Ok(body) => Ok(Delivery::new(platform, body)),
        Err(e) => {
            log_failure(platform, operation, &e);
            Err(e)
        }
    }
}

/// Validate a media URL before it is embedded in a provider envelope.
///
/// # Errors
///
/// Returns [`ChannelError::InvalidMediaUrl`] when the value does not parse
/// as an absolute URL.
pub fn validate_media_url(media_url: &str) -> Result<(), ChannelError> {
    url::Url::parse(media_url)
        .map(|_| ())
        .map_err(|_| ChannelError::InvalidMediaUrl(media_url.to_owned()))
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Uniform capability interface over one messaging platform.
///
/// Required surface is plain text send plus the conversation read path;
/// media sends and read receipts are optional capabilities whose default
/// implementations return [`ChannelError::Unsupported`]. Every method
/// performs exactly one outbound network call per invocation — no retries,
/// no batching, no idempotency keys; duplicate calls produce duplicate
/// sends.
///
/// All adapters must be `Send + Sync` so a registry can be shared across
/// async task boundaries.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// The platform this adapter is bound to.
    fn platform(&self) -> Platform;

    /// Whether this adapter implements the media send path.
    fn supports_media(&self) -> bool {
        false
    }

    /// Whether this adapter implements read receipts.
    fn supports_read_receipts(&self) -> bool {
        false
    }

    /// Send a plain text message to a recipient.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] on transport, status, or parse failure.
    async fn send_text(
        &self,
        recipient: &str,
        body: &str,
        options: &SendOptions,
    ) -> Result<Delivery, ChannelError>;

    /// Send a media message (image or document) to a recipient.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Unsupported`] unless the adapter overrides
    /// this method; otherwise transport errors as for [`Self::send_text`].
    async fn send_media(
        &self,
        recipient: &str,
        media_url: &str,
        caption: Option<&str>,
        kind: MediaKind,
    ) -> Result<Delivery, ChannelError> {
        let _ = (recipient, media_url, caption, kind);
        Err(ChannelError::Unsupported {
            platform: self.platform(),
            operation: Operation::SendMedia,
        })
    }

    /// Mark a message or conversation as read.
    ///
    /// Platforms key read receipts differently: WhatsApp and email ack by
    /// `message_id`, Facebook by `sender_id`. Each adapter reads the field
    /// it needs and ignores the other.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Unsupported`] unless the adapter overrides
    /// this method.
    async fn mark_read(&self, message_id: &str, sender_id: &str) -> Result<Delivery, ChannelError> {
        let _ = (message_id, sender_id);
        Err(ChannelError::Unsupported {
            platform: self.platform(),
            operation: Operation::MarkRead,
        })
    }

    /// Fetch the provider's conversation/update listing.
    ///
    /// Stub transports return an empty `{"items": [], "count": 0}` listing.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] on transport, status, or parse failure.
    async fn list_conversations(&self) -> Result<Delivery, ChannelError>;
}
