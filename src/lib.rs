//! Courier — unified outbound messaging dispatch.
//!
//! One registry, seven platform adapters (WhatsApp, Telegram, Instagram,
//! Facebook Messenger, email, SMS, LinkedIn). Callers construct a
//! [`registry::ChannelRegistry`] from configuration and dispatch generic
//! send / media / read calls; each adapter translates them into the exact
//! envelope its provider expects.
//!
//! This layer makes no delivery guarantees: one network call per
//! invocation, no retries, no idempotency keys. De-duplication and retry
//! policy belong to the caller.
//!
//! See `DESIGN.md` for design notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod channels;
pub mod config;
pub mod logging;
pub mod registry;
