#![allow(missing_docs)]

//! Courier CLI — one-shot dispatch against the configured platforms.
//!
//! Loads configuration (`.env`, then `courier.toml`, then env overrides),
//! builds the channel registry, runs a single operation, and prints the raw
//! provider response as JSON on stdout.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use courier::channels::{Delivery, MediaKind, Platform, SendOptions};
use courier::config::CourierConfig;
use courier::logging::{self, LoggingGuard};
use courier::registry::ChannelRegistry;

#[derive(Parser)]
#[command(name = "courier", version, about = "Unified outbound messaging dispatch")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the platforms with registered integrations.
    Platforms,
    /// Send a plain text message.
    Send {
        /// Target platform (whatsapp, telegram, instagram, facebook, email, sms, linkedin).
        #[arg(long)]
        platform: String,
        /// Recipient identifier (phone, chat id, user id, address, URN).
        #[arg(long)]
        to: String,
        /// Message body.
        #[arg(long)]
        message: String,
        /// Subject line (email only; defaults to a placeholder).
        #[arg(long)]
        subject: Option<String>,
    },
    /// Send a media message (image or document).
    SendMedia {
        /// Target platform.
        #[arg(long)]
        platform: String,
        /// Recipient identifier.
        #[arg(long)]
        to: String,
        /// Publicly reachable media URL.
        #[arg(long)]
        url: String,
        /// Optional caption.
        #[arg(long)]
        caption: Option<String>,
        /// Media kind: "image" routes to the photo path, anything else to documents.
        #[arg(long, default_value = "image")]
        kind: String,
    },
    /// Mark a message or conversation as read.
    MarkRead {
        /// Target platform.
        #[arg(long)]
        platform: String,
        /// Message id (WhatsApp, email).
        #[arg(long, default_value = "")]
        message_id: String,
        /// Sender id (Facebook).
        #[arg(long, default_value = "")]
        sender_id: String,
    },
    /// Fetch the provider's conversation listing.
    Conversations {
        /// Target platform.
        #[arg(long)]
        platform: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Seed process env from an optional .env before config resolution.
    let _ = dotenvy::dotenv();

    let config = CourierConfig::load().context("failed to load configuration")?;

    let _guard: Option<LoggingGuard> = match &config.logging.dir {
        Some(dir) => Some(logging::init_production(
            Path::new(dir),
            &config.logging.level,
        )?),
        None => {
            logging::init_cli(&config.logging.level);
            None
        }
    };

    let registry = ChannelRegistry::from_config(&config);

    match cli.command {
        Command::Platforms => {
            for platform in registry.available_platforms() {
                println!("{platform}");
            }
            Ok(())
        }
        Command::Send {
            platform,
            to,
            message,
            subject,
        } => {
            let platform = parse_platform(&platform)?;
            let options = SendOptions { subject };
            let delivery = registry
                .send_message(platform, &to, &message, &options)
                .await?;
            print_delivery(&delivery)
        }
        Command::SendMedia {
            platform,
            to,
            url,
            caption,
            kind,
        } => {
            let platform = parse_platform(&platform)?;
            let kind = MediaKind::from_label(&kind);
            let delivery = registry
                .send_media(platform, &to, &url, caption.as_deref(), kind)
                .await?;
            print_delivery(&delivery)
        }
        Command::MarkRead {
            platform,
            message_id,
            sender_id,
        } => {
            let platform = parse_platform(&platform)?;
            let delivery = registry.mark_read(platform, &message_id, &sender_id).await?;
            print_delivery(&delivery)
        }
        Command::Conversations { platform } => {
            let platform = parse_platform(&platform)?;
            let delivery = registry.list_conversations(platform).await?;
            print_delivery(&delivery)
        }
    }
}

fn parse_platform(raw: &str) -> Result<Platform> {
    raw.parse::<Platform>().map_err(Into::into)
}

fn print_delivery(delivery: &Delivery) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(&delivery.body).context("failed to render response body")?;
    println!("{rendered}");
    Ok(())
}
