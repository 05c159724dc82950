//! Common test utilities for zbx-client integration tests
//!
//! A lightweight HTTP endpoint standing in for the monitoring API. Every
//! request it receives is forwarded to the test over a channel so headers
//! and envelopes can be asserted on.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

pub const API_PATH: &str = "/api_jsonrpc.php";

/// What the mock sends back for one request
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockReply {
    /// 200 with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    /// Arbitrary status with the given body
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    /// Hold the reply back for `delay`
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub headers: HeaderMap,
    pub envelope: serde_json::Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }

    pub fn method(&self) -> &str {
        self.envelope["method"].as_str().unwrap_or_default()
    }
}

type Handler = Arc<dyn Fn(&serde_json::Value) -> MockReply + Send + Sync>;

#[derive(Clone)]
struct MockState {
    handler: Handler,
    requests: mpsc::UnboundedSender<RecordedRequest>,
}

/// Mock JSON-RPC endpoint for client testing
pub struct MockApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    request_rx: mpsc::UnboundedReceiver<RecordedRequest>,
}

impl MockApiServer {
    /// Start a mock whose handler maps each decoded request envelope to a reply
    pub async fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&serde_json::Value) -> MockReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (request_tx, request_rx) = mpsc::unbounded_channel();

        let state = MockState {
            handler: Arc::new(handler),
            requests: request_tx,
        };
        let app = Router::new()
            .route(API_PATH, post(handle))
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            request_rx,
        }
    }

    /// Mock that logs in with `token` and answers every other method with `result`
    pub async fn logged_in(token: &'static str, result: serde_json::Value) -> Self {
        Self::with_handler(move |req| {
            let id = req["id"].as_i64().unwrap_or(1);
            if req["method"] == "user.login" {
                MockReply::ok(mock_response(id, serde_json::json!(token)))
            } else {
                MockReply::ok(mock_response(id, result.clone()))
            }
        })
        .await
    }

    /// Endpoint URL for a client config
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, API_PATH)
    }

    /// Wait for the next request the mock received
    pub async fn next_request(&mut self) -> Option<RecordedRequest> {
        tokio::time::timeout(Duration::from_secs(5), self.request_rx.recv())
            .await
            .ok()
            .flatten()
    }

    /// Shutdown the mock server
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

async fn handle(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let envelope = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    let reply = (state.handler)(&envelope);

    let _ = state.requests.send(RecordedRequest { headers, envelope });

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, reply.body)
}

/// Helper to create a JSON-RPC success envelope
pub fn mock_response(id: i64, result: serde_json::Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": id
    })
    .to_string()
}

/// Helper to create a JSON-RPC error envelope
pub fn mock_error_response(id: i64, code: i64, message: &str, data: &str) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "error": {
            "code": code,
            "message": message,
            "data": data
        },
        "id": id
    })
    .to_string()
}
