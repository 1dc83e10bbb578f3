//! Local stand-in for the flomo webhook used by tests

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::Value;

const WEBHOOK_PATH: &str = "/iwh/MTA4MjYz/test-token/";

#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
enum StubBody {
    Json(Value),
    Raw(&'static str),
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: StubBody,
    hits: Arc<Mutex<Vec<Hit>>>,
}

pub struct StubRelay {
    addr: SocketAddr,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl StubRelay {
    pub async fn spawn(status: StatusCode, reply: Value) -> Self {
        Self::start(status, StubBody::Json(reply)).await
    }

    /// Replies with a plain-text body instead of JSON.
    pub async fn spawn_raw(status: StatusCode, reply: &'static str) -> Self {
        Self::start(status, StubBody::Raw(reply)).await
    }

    async fn start(status: StatusCode, reply: StubBody) -> Self {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            reply,
            hits: hits.clone(),
        };
        let app = Router::new()
            .route(WEBHOOK_PATH, any(capture))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub relay");
        let addr = listener.local_addr().expect("stub relay address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub relay serve");
        });

        Self { addr, hits }
    }

    pub fn url(&self) -> String {
        format!("http://{}{WEBHOOK_PATH}", self.addr)
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().expect("hits lock").clone()
    }

    /// URL on a port nothing listens on.
    pub async fn unused_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind probe");
        let addr = listener.local_addr().expect("probe address");
        drop(listener);
        format!("http://{addr}{WEBHOOK_PATH}")
    }
}

async fn capture(
    State(state): State<StubState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let hit = Hit {
        method: method.to_string(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    state.hits.lock().expect("hits lock").push(hit);

    match state.reply {
        StubBody::Json(reply) => (state.status, Json(reply)).into_response(),
        StubBody::Raw(reply) => (state.status, reply).into_response(),
    }
}
