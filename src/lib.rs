// Flowbell - Feishu webhook alerting for pipeline orchestrators
//
// This library delivers alert messages to Feishu ("Lark") custom-bot
// webhooks: a thin client that builds and signs the bot's JSON payloads,
// a task adapter a pipeline engine can invoke, and a failure-alert
// callback built on top of both.

// Re-export the webhook core
pub use flowbell_webhook::*;

// Re-export the orchestration-facing half
#[cfg(feature = "alert")]
pub use flowbell_alert as alert;
