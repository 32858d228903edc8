//! End-to-end failure alerting against a mock webhook endpoint.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flowbell::alert::{Environment, FailureAlert, TaskContext, TaskError};
use flowbell::{Connection, StaticConnections, WebhookClient, WebhookError};

fn failed_context() -> TaskContext {
    let execution_date = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
    TaskContext::new("daily_etl", "load_warehouse", execution_date)
        .with_error("worker ran out of memory")
}

fn webhook_client(server: &MockServer) -> WebhookClient {
    let connections = StaticConnections::new().with(
        "ops-alerts",
        Connection::new(server.uri()).with_secret("top-secret"),
    );
    WebhookClient::with_provider(Arc::new(connections))
}

#[tokio::test]
async fn production_failure_sends_one_signed_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .mount(&server)
        .await;

    let client = webhook_client(&server);
    let alert = FailureAlert::new(
        "ops-alerts",
        "https://pipelines.example.com/graph",
        Environment::Production,
    );

    alert
        .on_task_failure(&failed_context(), &client)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["msg_type"], json!("post"));

    // Signed payloads carry both fields, as a string timestamp
    assert!(body["timestamp"].is_string());
    assert!(body["sign"].is_string());

    // The tag sequence is nested as a single element of the content array
    let locale = &body["content"]["post"]["zh_cn"];
    assert_eq!(locale["title"], json!("服务告警"));
    let rows = locale["content"].as_array().unwrap();
    assert_eq!(rows.len(), 1);

    let tags = rows[0].as_array().unwrap();
    assert_eq!(tags[0]["tag"], json!("text"));
    assert_eq!(tags[1]["tag"], json!("a"));

    // The deep link's execution date is percent-encoded
    let href = tags[1]["href"].as_str().unwrap();
    assert!(href.contains("dag_id=daily_etl"));
    assert!(href.contains("execution_date=2021-01-01T00%3A00%3A00%2B00%3A00"));
}

#[tokio::test]
async fn non_production_failure_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .mount(&server)
        .await;

    let client = webhook_client(&server);

    for environment in [Environment::Staging, Environment::Development] {
        let alert = FailureAlert::new(
            "ops-alerts",
            "https://pipelines.example.com/graph",
            environment,
        );
        alert
            .on_task_failure(&failed_context(), &client)
            .await
            .unwrap();
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn endpoint_rejection_propagates_as_delivery_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 19021, "msg": "sign match fail"})),
        )
        .mount(&server)
        .await;

    let client = webhook_client(&server);
    let alert = FailureAlert::new(
        "ops-alerts",
        "https://pipelines.example.com/graph",
        Environment::Production,
    );

    let result = alert.on_task_failure(&failed_context(), &client).await;

    match result {
        Err(TaskError::Webhook(WebhookError::Delivery { code, body })) => {
            assert_eq!(code, Some(19021));
            assert!(body.contains("sign match fail"));
        }
        other => panic!("expected a delivery error, got {other:?}"),
    }
}
