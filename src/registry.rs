//! Channel registry: single dispatch surface over the configured adapters.
//!
//! The registry is an explicit instance — construct it at application start
//! (usually via [`ChannelRegistry::from_config`]) and share it behind an
//! `Arc`. There is no module-level singleton. The map itself is not
//! internally locked: callers that mutate after startup from multiple tasks
//! must serialize externally.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::channels::email::EmailAdapter;
use crate::channels::facebook::FacebookAdapter;
use crate::channels::instagram::InstagramAdapter;
use crate::channels::linkedin::LinkedInAdapter;
use crate::channels::sms::SmsAdapter;
use crate::channels::telegram::TelegramAdapter;
use crate::channels::whatsapp::WhatsAppAdapter;
use crate::channels::{ChannelAdapter, ChannelError, Delivery, MediaKind, Platform, SendOptions};
use crate::config::CourierConfig;

/// Registry of live platform adapters keyed by [`Platform`].
#[derive(Default)]
pub struct ChannelRegistry {
    adapters: HashMap<Platform, Arc<dyn ChannelAdapter>>,
}

impl ChannelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration.
    ///
    /// One pass over the fixed platform list: each credential section that
    /// is present yields one registered adapter; absent sections are skipped
    /// entirely — no placeholder is registered and later dispatch fails with
    /// [`ChannelError::NotRegistered`]. Presence is the only validation.
    pub fn from_config(config: &CourierConfig) -> Self {
        let mut registry = Self::new();
        let channels = &config.channels;

        if let Some(c) = &channels.whatsapp {
            registry.register(Arc::new(WhatsAppAdapter::new(
                c.access_token.clone(),
                c.phone_number_id.clone(),
            )));
        }
        if let Some(c) = &channels.telegram {
            registry.register(Arc::new(TelegramAdapter::new(c.bot_token.clone())));
        }
        if let Some(c) = &channels.instagram {
            registry.register(Arc::new(InstagramAdapter::new(c.access_token.clone())));
        }
        if let Some(c) = &channels.facebook {
            registry.register(Arc::new(FacebookAdapter::new(c.page_access_token.clone())));
        }
        if let Some(c) = &channels.email {
            registry.register(Arc::new(EmailAdapter::new(
                c.from_address.clone(),
                c.reply_to.clone(),
            )));
        }
        if let Some(c) = &channels.sms {
            registry.register(Arc::new(SmsAdapter::new(
                c.api_key.clone(),
                c.from_number.clone(),
            )));
        }
        if let Some(c) = &channels.linkedin {
            registry.register(Arc::new(LinkedInAdapter::new(c.access_token.clone())));
        }

        info!(
            platforms = ?registry.available_platforms(),
            "channel registry initialized"
        );
        registry
    }

    /// Register an adapter under its platform key.
    ///
    /// Overwrite semantics: the last registration for a platform wins.
    /// Returns the adapter it replaced, if any.
    pub fn register(
        &mut self,
        adapter: Arc<dyn ChannelAdapter>,
    ) -> Option<Arc<dyn ChannelAdapter>> {
        let platform = adapter.platform();
        let previous = self.adapters.insert(platform, adapter);
        if previous.is_some() {
            debug!(%platform, "replacing existing adapter registration");
        } else {
            info!(%platform, "integration registered");
        }
        previous
    }

    /// Look up the adapter registered for a platform.
    pub fn get(&self, platform: Platform) -> Option<Arc<dyn ChannelAdapter>> {
        self.adapters.get(&platform).cloned()
    }

    /// Whether an adapter is currently registered for the platform.
    pub fn is_active(&self, platform: Platform) -> bool {
        self.adapters.contains_key(&platform)
    }

    /// All currently-registered platforms, in sorted order.
    pub fn available_platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<Platform> = self.adapters.keys().copied().collect();
        platforms.sort();
        platforms
    }

    fn require(&self, platform: Platform) -> Result<Arc<dyn ChannelAdapter>, ChannelError> {
        self.get(platform)
            .ok_or(ChannelError::NotRegistered { platform })
    }

    /// Send a text message through the adapter registered for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::NotRegistered`] — before any network attempt —
    /// when no adapter is registered; otherwise whatever the adapter returns.
    pub async fn send_message(
        &self,
        platform: Platform,
        recipient: &str,
        body: &str,
        options: &SendOptions,
    ) -> Result<Delivery, ChannelError> {
        self.require(platform)?
            .send_text(recipient, body, options)
            .await
    }

    /// Send a media message through the adapter registered for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::NotRegistered`] when absent and
    /// [`ChannelError::Unsupported`] from adapters without a media path.
    pub async fn send_media(
        &self,
        platform: Platform,
        recipient: &str,
        media_url: &str,
        caption: Option<&str>,
        kind: MediaKind,
    ) -> Result<Delivery, ChannelError> {
        self.require(platform)?
            .send_media(recipient, media_url, caption, kind)
            .await
    }

    /// Mark a message or conversation as read.
    ///
    /// Adapters key read receipts differently (message id for WhatsApp and
    /// email, sender id for Facebook); both identifiers are forwarded and
    /// each adapter reads the one it needs.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::NotRegistered`] when absent and a typed
    /// [`ChannelError::Unsupported`] — not a logged no-op — from platforms
    /// with no read receipt concept.
    pub async fn mark_read(
        &self,
        platform: Platform,
        message_id: &str,
        sender_id: &str,
    ) -> Result<Delivery, ChannelError> {
        self.require(platform)?
            .mark_read(message_id, sender_id)
            .await
    }

    /// Fetch the conversation listing for a platform.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::NotRegistered`] when absent; otherwise
    /// whatever the adapter's read path returns.
    pub async fn list_conversations(&self, platform: Platform) -> Result<Delivery, ChannelError> {
        self.require(platform)?.list_conversations().await
    }
}
