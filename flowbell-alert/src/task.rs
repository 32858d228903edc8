//! Pipeline task integration

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use flowbell_webhook::{Message, SendRequest, Sendable};

use crate::error::TaskError;

/// Execution context supplied by the pipeline engine.
#[derive(Debug, Clone)]
pub struct TaskContext {
    /// Pipeline (DAG) identifier
    pub pipeline_id: String,

    /// Task identifier within the pipeline
    pub task_id: String,

    /// Scheduled execution timestamp of the run
    pub execution_date: DateTime<Utc>,

    /// The triggering error, present on failure callbacks
    pub error: Option<String>,
}

impl TaskContext {
    /// Create a context for one task run.
    pub fn new(
        pipeline_id: impl Into<String>,
        task_id: impl Into<String>,
        execution_date: DateTime<Utc>,
    ) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            task_id: task_id.into(),
            execution_date,
            error: None,
        }
    }

    /// Attach the error that triggered a failure callback.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// A unit of work the pipeline engine can invoke.
///
/// Implementations either complete normally or propagate a failure;
/// errors are never swallowed.
#[async_trait]
pub trait Task: Send + Sync {
    /// Task name, as registered with the engine.
    fn name(&self) -> &str;

    /// Run the task to completion.
    async fn execute(&self, ctx: &TaskContext) -> Result<(), TaskError>;
}

/// Pipeline task that sends one webhook message when invoked.
///
/// Parameters arrive in the engine's dynamic form (the message type as a
/// string, the message as a JSON value) and are validated when the task
/// runs. Everything else is the client's behavior; this type adds no
/// logic of its own.
pub struct AlertTask {
    name: String,
    connection_id: String,
    message_type: String,
    message: serde_json::Value,
    use_secret: bool,
    sender: Arc<dyn Sendable>,
}

impl AlertTask {
    /// Create a task sending an unsigned message.
    pub fn new(
        name: impl Into<String>,
        connection_id: impl Into<String>,
        message_type: impl Into<String>,
        message: serde_json::Value,
        sender: Arc<dyn Sendable>,
    ) -> Self {
        Self {
            name: name.into(),
            connection_id: connection_id.into(),
            message_type: message_type.into(),
            message,
            use_secret: false,
            sender,
        }
    }

    /// Sign outbound payloads with the connection secret.
    pub fn with_secret(mut self) -> Self {
        self.use_secret = true;
        self
    }
}

#[async_trait]
impl Task for AlertTask {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, _ctx: &TaskContext) -> Result<(), TaskError> {
        info!(task = %self.name, connection = %self.connection_id, "Sending Feishu message");

        let message = Message::from_value(&self.message_type, self.message.clone())?;
        let mut request = SendRequest::new(&self.connection_id, message);
        if self.use_secret {
            request = request.signed();
        }

        self.sender.send(&request).await?;
        Ok(())
    }
}
