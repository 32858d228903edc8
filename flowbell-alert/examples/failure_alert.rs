//! Sends a demo failure alert to a real Feishu webhook.
//!
//! ```bash
//! FLOWBELL_CONN_DEMO_URL=https://open.feishu.cn/open-apis/bot/v2/hook/... \
//! FLOWBELL_CONN_DEMO_SECRET=bot-signing-secret \
//! FLOWBELL_ENV=production \
//! cargo run -p flowbell-alert --example failure_alert
//! ```

use std::sync::Arc;

use chrono::Utc;
use flowbell_alert::{Environment, FailureAlert, TaskContext};
use flowbell_webhook::{EnvConnections, WebhookClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let client = WebhookClient::with_provider(Arc::new(EnvConnections::new()));

    let alert = FailureAlert::new(
        "demo",
        "https://pipelines.example.com/graph",
        Environment::from_env(),
    );

    let ctx = TaskContext::new("daily_etl", "load_warehouse", Utc::now())
        .with_error("worker ran out of memory");

    alert.on_task_failure(&ctx, &client).await?;
    Ok(())
}
