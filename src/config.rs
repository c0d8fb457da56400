//! Configuration loading and management.
//!
//! Loads courier configuration from `./courier.toml` (or
//! `$COURIER_CONFIG_PATH`). Environment variables override file values; file
//! values override defaults.
//!
//! Precedence: env vars > config file > defaults.
//!
//! Credential values never appear in `Debug` output.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

// ── Top-level config ────────────────────────────────────────────

/// Top-level courier configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// Logging settings (`[logging]`).
    pub logging: LoggingConfig,
    /// Per-platform credential sections (`[channels.*]`).
    pub channels: ChannelsConfig,
}

impl CourierConfig {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// Config file path: `$COURIER_CONFIG_PATH` or `./courier.toml`.
    /// If the file does not exist, returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from TOML file only, no env overrides.
    fn load_from_file() -> Result<Self> {
        let path = Self::config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                let config: CourierConfig =
                    toml::from_str(&contents).context("failed to parse config TOML")?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, using defaults");
                Ok(CourierConfig::default())
            }
            Err(e) => Err(anyhow::anyhow!("failed to read config file: {e}")),
        }
    }

    /// Resolve config file path: `$COURIER_CONFIG_PATH`, then `./courier.toml`.
    fn config_path() -> PathBuf {
        Self::config_path_with(|key| std::env::var(key).ok())
    }

    /// Resolve config path using a custom env resolver (for testing).
    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(p) = env("COURIER_CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("courier.toml")
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function for testability. For platforms whose
    /// credential is a single token, presence of the env var creates or
    /// replaces the section. WhatsApp and SMS need two values; the second is
    /// taken from its env var or the existing section, and the override is
    /// ignored with a warning when neither is available.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("COURIER_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = env("COURIER_LOG_DIR") {
            self.logging.dir = Some(v);
        }

        if let Some(access_token) = env("COURIER_WHATSAPP_ACCESS_TOKEN") {
            let phone_number_id = env("COURIER_WHATSAPP_PHONE_NUMBER_ID").or_else(|| {
                self.channels
                    .whatsapp
                    .as_ref()
                    .map(|c| c.phone_number_id.clone())
            });
            match phone_number_id {
                Some(phone_number_id) => {
                    self.channels.whatsapp = Some(WhatsAppConfig {
                        access_token,
                        phone_number_id,
                    });
                }
                None => tracing::warn!(
                    var = "COURIER_WHATSAPP_ACCESS_TOKEN",
                    "ignoring override: no WhatsApp phone number id configured"
                ),
            }
        }

        if let Some(bot_token) = env("COURIER_TELEGRAM_BOT_TOKEN") {
            self.channels.telegram = Some(TelegramConfig { bot_token });
        }

        if let Some(access_token) = env("COURIER_INSTAGRAM_ACCESS_TOKEN") {
            self.channels.instagram = Some(InstagramConfig { access_token });
        }

        if let Some(page_access_token) = env("COURIER_FACEBOOK_PAGE_ACCESS_TOKEN") {
            self.channels.facebook = Some(FacebookConfig { page_access_token });
        }

        if let Some(from_address) = env("COURIER_EMAIL_FROM") {
            let reply_to = self
                .channels
                .email
                .as_ref()
                .and_then(|c| c.reply_to.clone());
            self.channels.email = Some(EmailConfig {
                from_address,
                reply_to,
            });
        }

        if let Some(api_key) = env("COURIER_SMS_API_KEY") {
            let from_number = env("COURIER_SMS_FROM_NUMBER")
                .or_else(|| self.channels.sms.as_ref().map(|c| c.from_number.clone()));
            match from_number {
                Some(from_number) => {
                    self.channels.sms = Some(SmsConfig {
                        api_key,
                        from_number,
                    });
                }
                None => tracing::warn!(
                    var = "COURIER_SMS_API_KEY",
                    "ignoring override: no SMS sender number configured"
                ),
            }
        }

        if let Some(access_token) = env("COURIER_LINKEDIN_ACCESS_TOKEN") {
            self.channels.linkedin = Some(LinkedInConfig { access_token });
        }
    }
}

// ── Logging ─────────────────────────────────────────────────────

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for JSON file logs. When unset, logs go to stderr only.
    pub dir: Option<String>,
    /// Default log level when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            level: "info".to_owned(),
        }
    }
}

// ── Channel credentials ─────────────────────────────────────────

/// Per-platform credential sections. A platform with no section present is
/// skipped at bootstrap — no adapter, no placeholder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelsConfig {
    /// WhatsApp Cloud API credentials.
    pub whatsapp: Option<WhatsAppConfig>,
    /// Telegram Bot API credentials.
    pub telegram: Option<TelegramConfig>,
    /// Instagram Messaging credentials.
    pub instagram: Option<InstagramConfig>,
    /// Facebook Messenger credentials.
    pub facebook: Option<FacebookConfig>,
    /// Email transport settings.
    pub email: Option<EmailConfig>,
    /// SMS transport credentials.
    pub sms: Option<SmsConfig>,
    /// LinkedIn messaging credentials.
    pub linkedin: Option<LinkedInConfig>,
}

/// WhatsApp Cloud API credentials.
#[derive(Clone, Deserialize)]
pub struct WhatsAppConfig {
    /// Graph API access token.
    pub access_token: String,
    /// Business phone number id the adapter sends from.
    pub phone_number_id: String,
}

impl fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field("access_token", &"[REDACTED]")
            .field("phone_number_id", &self.phone_number_id)
            .finish()
    }
}

/// Telegram Bot API credentials.
#[derive(Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    pub bot_token: String,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .finish()
    }
}

/// Instagram Messaging credentials.
#[derive(Clone, Deserialize)]
pub struct InstagramConfig {
    /// Instagram Graph access token.
    pub access_token: String,
}

impl fmt::Debug for InstagramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstagramConfig")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Facebook Messenger credentials.
#[derive(Clone, Deserialize)]
pub struct FacebookConfig {
    /// Page access token.
    pub page_access_token: String,
}

impl fmt::Debug for FacebookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacebookConfig")
            .field("page_access_token", &"[REDACTED]")
            .finish()
    }
}

/// Email transport settings (stub transport).
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Sender address.
    pub from_address: String,
    /// Optional reply-to address.
    #[serde(default)]
    pub reply_to: Option<String>,
}

/// SMS transport credentials (stub transport).
#[derive(Clone, Deserialize)]
pub struct SmsConfig {
    /// Provider API key.
    pub api_key: String,
    /// Sender phone number.
    pub from_number: String,
}

impl fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsConfig")
            .field("api_key", &"[REDACTED]")
            .field("from_number", &self.from_number)
            .finish()
    }
}

/// LinkedIn messaging credentials.
#[derive(Clone, Deserialize)]
pub struct LinkedInConfig {
    /// Member access token.
    pub access_token: String,
}

impl fmt::Debug for LinkedInConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedInConfig")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
