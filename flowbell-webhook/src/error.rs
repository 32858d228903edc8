//! Error types for webhook operations

use thiserror::Error;

/// Errors that can occur while sending a Feishu webhook message
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Connection or signing configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Message type is not one of the supported kinds
    #[error("Unsupported message type: {0} (supported: text, post)")]
    UnsupportedMessageType(String),

    /// Message value does not have the shape its type requires
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// No connection registered under the given id
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook endpoint did not report success
    #[error("Delivery failed (status field: {code:?}): {body}")]
    Delivery {
        /// Value of the response status field, if one was present
        code: Option<i64>,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// Payload serialization failed
    #[error("Payload error: {0}")]
    Payload(String),
}

impl WebhookError {
    /// True for errors raised before any network I/O is attempted.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_) | Self::ConnectionNotFound(_))
    }

    /// True for errors raised before any payload is constructed.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::UnsupportedMessageType(_) | Self::InvalidMessage(_))
    }

    /// True for errors raised by or after the request attempt.
    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Delivery { .. })
    }
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::Payload(err.to_string())
    }
}
