//! Pipeline alerting over Feishu webhooks
//!
//! This crate is the orchestration-facing half of Flowbell: it adapts the
//! webhook client in `flowbell-webhook` into a unit of work a pipeline
//! engine can invoke, and ships the failure-alert policy built on top of
//! it.
//!
//! - [`AlertTask`] is the operator-equivalent: it takes the engine's
//!   dynamic parameters (connection id, message type, message value) and
//!   delegates to anything [`Sendable`](flowbell_webhook::Sendable).
//! - [`FailureAlert`] is the example policy: on a task failure in the
//!   production environment it sends one signed rich-text alert with a
//!   deep link back into the orchestration UI.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::Utc;
//! use flowbell_alert::{Environment, FailureAlert, TaskContext};
//! use flowbell_webhook::{Connection, StaticConnections, WebhookClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let connections = StaticConnections::new().with(
//!         "ops-alerts",
//!         Connection::new("https://open.feishu.cn/open-apis/bot/v2/hook/...")
//!             .with_secret("bot-signing-secret"),
//!     );
//!     let client = WebhookClient::with_provider(Arc::new(connections));
//!
//!     let alert = FailureAlert::new(
//!         "ops-alerts",
//!         "https://pipelines.example.com/graph",
//!         Environment::from_env(),
//!     );
//!
//!     let ctx = TaskContext::new("daily_etl", "load_warehouse", Utc::now())
//!         .with_error("worker ran out of memory");
//!     alert.on_task_failure(&ctx, &client).await?;
//!     Ok(())
//! }
//! ```

mod alert;
mod error;
mod task;

pub use alert::{Environment, FailureAlert};
pub use error::TaskError;
pub use task::{AlertTask, Task, TaskContext};
