use std::future::Future;
use std::net::TcpListener;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use relay_gateway::{BrokerServer, DownstreamClient, DownstreamTargets, default_client};
use relay_queue::{LogEntry, LogSink, PublishError};
use tokio::sync::watch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct NullSink;

impl LogSink for NullSink {
    fn publish(
        &self,
        _entry: LogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::test]
async fn broker_round_trip_over_real_sockets() {
    let collaborators = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "error": false,
            "message": "ok",
            "data": {"id": 7}
        })))
        .mount(&collaborators)
        .await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&collaborators)
        .await;

    let client = DownstreamClient::new(
        default_client(),
        DownstreamTargets {
            auth: format!("{}/authenticate", collaborators.uri()),
            log: format!("{}/log", collaborators.uri()),
            mail: format!("{}/send", collaborators.uri()),
        },
    );

    let port = free_port();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = BrokerServer::new("127.0.0.1", port, client, Arc::new(NullSink), shutdown_rx);
    let serving = tokio::spawn(server.serve());

    let http = reqwest::Client::new();
    let base = format!("http://127.0.0.1:{port}");
    for _ in 0..50 {
        if http.get(format!("{base}/health")).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let resp = http
        .post(format!("{base}/handle"))
        .json(&serde_json::json!({
            "action": "auth",
            "auth": {"email": "a@b.c", "password": "pw"}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 202);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], false);
    assert_eq!(body["message"], "Authed!");
    assert_eq!(body["data"]["id"], 7);

    let resp = http
        .post(format!("{base}/handle"))
        .json(&serde_json::json!({
            "action": "mail",
            "mail": {"from": "f", "to": "t@example.com", "subject": "s", "message": "m"}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 202);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Sent! t@example.com");

    let resp = http
        .post(format!("{base}/handle"))
        .json(&serde_json::json!({"action": "ship"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    shutdown_tx.send(true).unwrap();
    serving.await.unwrap().unwrap();
}
