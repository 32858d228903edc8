//! Error types for alert tasks

use flowbell_webhook::WebhookError;
use thiserror::Error;

/// Errors surfaced to the pipeline engine.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Webhook configuration, validation or delivery failed
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// A task parameter could not be translated
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
