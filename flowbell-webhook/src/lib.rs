//! Feishu webhook messaging for Flowbell
//!
//! This crate is the core of Flowbell's alerting: it builds the JSON
//! payloads a Feishu ("Lark") custom bot expects, optionally signs them
//! with the bot's shared secret, and delivers them over HTTP.
//!
//! Destinations are resolved by name through a [`ConnectionProvider`], so
//! webhook URLs and secrets stay in whatever store the host application
//! already manages. Delivery is deliberately simple: one request per
//! [`WebhookClient::send`] call, no retries, no batching; the host
//! framework owns any retry policy.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use flowbell_webhook::{
//!     Connection, Message, SendRequest, StaticConnections, WebhookClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let connections = StaticConnections::new().with(
//!         "ops-alerts",
//!         Connection::new("https://open.feishu.cn/open-apis/bot/v2/hook/...")
//!             .with_secret("bot-signing-secret"),
//!     );
//!
//!     let client = WebhookClient::with_provider(Arc::new(connections));
//!     client
//!         .send(&SendRequest::new("ops-alerts", Message::text("deploy finished")).signed())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Message shapes
//!
//! Two message types are supported: plain [`Message::Text`] and the
//! [`Message::Post`] rich-text card (a title plus an ordered sequence of
//! text and link [`Tag`]s). Dynamically supplied task parameters enter
//! through [`Message::from_value`], which validates shape before any
//! payload is built.

mod client;
mod config;
mod connection;
mod error;
mod message;
mod payload;
mod signature;

pub use client::{SendRequest, Sendable, WebhookClient};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use connection::{Connection, ConnectionProvider, EnvConnections, StaticConnections};
pub use error::WebhookError;
pub use message::{Message, MessageType, PostMessage, Tag};
pub use payload::OutboundPayload;
pub use signature::Signature;

/// Result type for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;
