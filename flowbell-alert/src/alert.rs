//! Failure alerting policy

use std::env;
use std::str::FromStr;

use tracing::{debug, info};
use url::Url;

use flowbell_webhook::{Message, PostMessage, SendRequest, Sendable, Tag};

use crate::error::TaskError;
use crate::task::TaskContext;

/// Fixed title of the failure alert card.
const ALERT_TITLE: &str = "服务告警";

/// Label of the deep link back into the orchestration UI.
const ALERT_LINK_TEXT: &str = "查看详情";

/// Deployment environment gate for alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Alerts are delivered
    Production,
    /// Alerts are suppressed
    Staging,
    /// Alerts are suppressed
    Development,
}

impl Environment {
    /// Resolve from the `FLOWBELL_ENV` process variable.
    ///
    /// Unset or unrecognized values resolve to `Development`, so alerting
    /// stays off unless a deployment opts in explicitly.
    pub fn from_env() -> Self {
        env::var("FLOWBELL_ENV")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Self::Development)
    }

    /// Whether this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "dev" | "development" => Ok(Self::Development),
            other => Err(TaskError::InvalidParameter(format!(
                "unknown environment: {other}"
            ))),
        }
    }
}

/// Sends a Feishu alert when a pipeline task fails.
///
/// The environment is resolved once at construction and threaded in;
/// outside production the callback is a no-op and never touches the
/// sender.
pub struct FailureAlert {
    connection_id: String,
    ui_base_url: String,
    environment: Environment,
}

impl FailureAlert {
    /// Create a failure alert policy.
    ///
    /// `ui_base_url` is the orchestration UI page the alert links back to;
    /// the failed run's coordinates are appended as query parameters.
    pub fn new(
        connection_id: impl Into<String>,
        ui_base_url: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            ui_base_url: ui_base_url.into(),
            environment,
        }
    }

    /// Handle a task-failure event.
    ///
    /// In production this sends exactly one signed `post` message through
    /// `sender`: a summary of the failed run plus a deep link into the
    /// orchestration UI. Anywhere else it returns without side effects.
    pub async fn on_task_failure(
        &self,
        ctx: &TaskContext,
        sender: &dyn Sendable,
    ) -> Result<(), TaskError> {
        if !self.environment.is_production() {
            debug!(
                pipeline = %ctx.pipeline_id,
                task = %ctx.task_id,
                "Skipping failure alert outside production"
            );
            return Ok(());
        }

        let summary = format!(
            "PIPELINE TASK FAILURE:\nDAG:    {}\nTASK:   {}\nReason: {}\n",
            ctx.pipeline_id,
            ctx.task_id,
            ctx.error.as_deref().unwrap_or("unknown"),
        );

        let message = Message::post(
            PostMessage::new(ALERT_TITLE)
                .with_tag(Tag::text(summary))
                .with_tag(Tag::link(ALERT_LINK_TEXT, self.detail_url(ctx)?)),
        );

        info!(
            pipeline = %ctx.pipeline_id,
            task = %ctx.task_id,
            "Sending task failure alert"
        );

        sender
            .send(&SendRequest::new(&self.connection_id, message).signed())
            .await?;
        Ok(())
    }

    /// Deep link into the orchestration UI for the failed run.
    ///
    /// Query values, the execution date in particular, are percent-encoded
    /// by the URL serializer.
    fn detail_url(&self, ctx: &TaskContext) -> Result<String, TaskError> {
        let mut url = Url::parse(&self.ui_base_url).map_err(|e| {
            TaskError::InvalidParameter(format!("invalid UI base URL '{}': {e}", self.ui_base_url))
        })?;

        url.query_pairs_mut()
            .append_pair("dag_id", &ctx.pipeline_id)
            .append_pair("root", "")
            .append_pair("execution_date", &ctx.execution_date.to_rfc3339());

        Ok(url.into())
    }
}
