//! In-process stand-in for the Gemini REST endpoint.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::config::GatewayConfig;
use crate::gateway::GeminiGateway;

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Value,
    requests: Arc<Mutex<Vec<Value>>>,
}

pub struct MockProvider {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockProvider {
    /// Serves `body` with `status` for every `generateContent` call and
    /// records the request bodies.
    pub async fn start(status: StatusCode, body: Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState { status, body, requests: requests.clone() };

        let app = Router::new()
            .route("/v1beta/models/{call}", post(generate_content))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url: format!("http://{addr}"), requests }
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> Value {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one provider call");
        requests.into_iter().next().unwrap()
    }
}

async fn generate_content(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(body);
    (state.status, Json(state.body.clone()))
}

/// A provider response whose single candidate carries `text`.
pub fn model_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

pub fn gateway_for(base_url: &str) -> GeminiGateway {
    GeminiGateway::new(&GatewayConfig {
        api_key: "test-key".to_string(),
        model: "gemini-2.5-flash".to_string(),
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}
