//! Webhook client for delivering messages

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::ClientConfig;
use crate::connection::ConnectionProvider;
use crate::message::Message;
use crate::payload::OutboundPayload;
use crate::signature::Signature;
use crate::{Result, WebhookError};

/// One send operation: which connection, what message, signed or not.
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    /// Connection id to resolve the destination from
    pub connection_id: String,

    /// Message to deliver
    pub message: Message,

    /// Whether to sign the payload with the connection secret
    pub use_secret: bool,
}

impl SendRequest {
    /// Create an unsigned send request.
    pub fn new(connection_id: impl Into<String>, message: Message) -> Self {
        Self {
            connection_id: connection_id.into(),
            message,
            use_secret: false,
        }
    }

    /// Sign the payload with the connection secret.
    pub fn signed(mut self) -> Self {
        self.use_secret = true;
        self
    }
}

/// Capability of sending a webhook message.
///
/// Implemented by [`WebhookClient`]; adapters hold this seam so the
/// transport can be replaced with a recording fake in tests.
#[async_trait]
pub trait Sendable: Send + Sync {
    /// Deliver one message, propagating any failure to the caller.
    async fn send(&self, request: &SendRequest) -> Result<()>;
}

/// Client for delivering messages to a Feishu webhook.
///
/// Each call to [`send`](WebhookClient::send) performs one request and
/// fully completes before returning; there is no state shared between
/// calls beyond the read-only connection provider.
#[derive(Clone)]
pub struct WebhookClient {
    provider: Arc<dyn ConnectionProvider>,
    http_client: Client,
    config: ClientConfig,
}

impl WebhookClient {
    /// Create a client over a connection provider with custom configuration.
    pub fn new(provider: Arc<dyn ConnectionProvider>, config: ClientConfig) -> Self {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            provider,
            http_client,
            config,
        }
    }

    /// Create a client with default configuration.
    pub fn with_provider(provider: Arc<dyn ConnectionProvider>) -> Self {
        Self::new(provider, ClientConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Deliver one message to the webhook behind `request.connection_id`.
    ///
    /// Configuration problems (unknown connection, missing host, missing
    /// secret when signing is requested) abort before any network I/O.
    /// The endpoint reply must carry a status field equal to `0`; anything
    /// else is a delivery error carrying the raw response body.
    pub async fn send(&self, request: &SendRequest) -> Result<()> {
        let connection = self.provider.resolve(&request.connection_id)?;
        if connection.host.is_empty() {
            return Err(WebhookError::Config(format!(
                "connection '{}' has no host configured",
                request.connection_id
            )));
        }

        let signature = if request.use_secret {
            let secret = connection.secret.as_deref().unwrap_or("");
            Some(Signature::generate(chrono::Utc::now().timestamp(), secret)?)
        } else {
            None
        };

        let payload = OutboundPayload::build(&request.message, signature.as_ref());
        let body = payload.to_json()?;

        debug!(
            message_type = request.message.message_type().as_str(),
            payload = %body,
            "Sending Feishu webhook message"
        );

        let response = self
            .http_client
            .post(&connection.host)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let reply = response.text().await?;

        let parsed: serde_json::Value = match serde_json::from_str(&reply) {
            Ok(value) => value,
            Err(_) => {
                error!(%status, body = %reply, "Feishu webhook returned a non-JSON response");
                return Err(WebhookError::Delivery {
                    code: None,
                    body: reply,
                });
            }
        };

        match status_field(&parsed) {
            Some(0) => {
                info!(response = %reply, "Feishu webhook message sent");
                Ok(())
            }
            code => {
                error!(%status, response = %reply, "Feishu webhook reported failure");
                Err(WebhookError::Delivery { code, body: reply })
            }
        }
    }
}

#[async_trait]
impl Sendable for WebhookClient {
    async fn send(&self, request: &SendRequest) -> Result<()> {
        WebhookClient::send(self, request).await
    }
}

/// Extract the success sentinel from a webhook reply.
///
/// The current bot API reports `code`; legacy deployments report
/// `StatusCode`.
fn status_field(reply: &serde_json::Value) -> Option<i64> {
    reply
        .get("code")
        .or_else(|| reply.get("StatusCode"))
        .and_then(|value| value.as_i64())
}
