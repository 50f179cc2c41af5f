// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Test helpers: a local stand-in for the Cobo API and request builders for
//! driving the gateway router.

use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::{
    api::router,
    config::CoboEnvironment,
    providers::cobo::{
        signing::{RequestSigner, API_KEY_HEADER, NONCE_HEADER, SIGNATURE_HEADER},
        CoboClient,
    },
    state::AppState,
};

/// Ed25519 seed used by every test client.
pub const TEST_SECRET: &str = "2222222222222222222222222222222222222222222222222222222222222222";

/// Wallet ID the stub answers with a 404.
pub const MISSING_WALLET: &str = "missing";

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn body_json(&self) -> Value {
        serde_json::from_str(&self.body).expect("recorded body is JSON")
    }

    fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Recompute the signature from what arrived on the wire.
    pub fn assert_signed(&self) {
        let signer = RequestSigner::from_hex(TEST_SECRET).expect("test secret is valid");
        assert_eq!(self.header(API_KEY_HEADER), signer.api_key());

        let nonce = self.header(NONCE_HEADER);
        assert!(nonce.parse::<i64>().is_ok(), "nonce {nonce:?} is not a timestamp");

        let expected = signer.sign(self.method.as_str(), &self.path, nonce, &self.query, &self.body);
        assert_eq!(self.header(SIGNATURE_HEADER), expected);
    }
}

#[derive(Clone, Default)]
struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Running stub Cobo server.
pub struct StubCobo {
    pub base_url: String,
    recorder: Recorder,
}

impl StubCobo {
    pub async fn spawn() -> Self {
        let recorder = Recorder::default();
        let app = Router::new()
            .fallback(record_and_respond)
            .with_state(recorder.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });

        Self {
            base_url: format!("http://{addr}/v2"),
            recorder,
        }
    }

    pub fn client(&self) -> CoboClient {
        CoboClient::for_tests(&self.base_url, TEST_SECRET)
    }

    pub fn app(&self) -> Router {
        router(AppState::new(self.client(), CoboEnvironment::Sandbox))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorder.requests.lock().expect("recorder lock").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("stub received no request")
    }
}

async fn record_and_respond(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    recorder
        .requests
        .lock()
        .expect("recorder lock")
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query: uri.query().unwrap_or_default().to_string(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    canned_response(&method, &path)
}

fn canned_response(method: &Method, path: &str) -> Response {
    let last_segment = path.rsplit('/').next().unwrap_or_default();

    if path.split('/').any(|segment| segment == MISSING_WALLET) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error_code": 2002,
                "error_message": "Wallet not found",
                "error_id": "f1e2d3c4"
            })),
        )
            .into_response();
    }

    match method.as_str() {
        "POST" if path.ends_with("/addresses") => {
            Json(json!([{ "address": "0xnew", "chain_id": "ETH" }])).into_response()
        }
        "POST" => Json(json!({
            "request_id": "req-1",
            "transaction_id": "tx-1",
            "status": "Submitted"
        }))
        .into_response(),
        "GET" if last_segment == "check_address_validity" => {
            Json(json!({ "validity": true })).into_response()
        }
        "GET"
            if matches!(
                last_segment,
                "wallets" | "transactions" | "tokens" | "addresses" | "chains"
            ) =>
        {
            Json(json!({
                "data": [{ "path": path }],
                "pagination": { "before": "", "after": "cursor-2", "total_count": 1 }
            }))
            .into_response()
        }
        _ => Json(json!({ "id": last_segment, "path": path })).into_response(),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn post_raw(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request")
}

/// Drive one request through `app` and decode the JSON response.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
