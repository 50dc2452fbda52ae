//! In-process mock of the Falcon service.

#![allow(dead_code, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

/// One multipart field as received.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

/// One request as received.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: &'static str,
    pub api_key: Option<String>,
    pub json: Option<Value>,
    pub fields: Vec<Field>,
}

impl Captured {
    pub fn texts(&self, name: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.name == name && f.file_name.is_none())
            .map(|f| String::from_utf8(f.data.clone()).unwrap())
            .collect()
    }

    pub fn files(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.name == "file").collect()
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: Value,
    requests: Arc<Mutex<Vec<Captured>>>,
}

/// A running mock server answering every request with a fixed status and body.
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl MockServer {
    pub async fn start(status: StatusCode, reply: Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            reply,
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/v1/chat/predictLB", post(predict))
            .route("/v1/chat/create_embeddingLB", post(create_embedding))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub fn host_name_port(&self) -> String {
        self.addr.to_string()
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

fn api_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

async fn predict(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(Captured {
        path: "/v1/chat/predictLB",
        api_key: api_key(&headers),
        json: Some(body),
        fields: Vec::new(),
    });
    (state.status, Json(state.reply.clone()))
}

async fn create_embedding(
    State(state): State<MockState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_owned();
        let file_name = field.file_name().map(str::to_owned);
        let data = field.bytes().await.unwrap().to_vec();
        fields.push(Field {
            name,
            file_name,
            data,
        });
    }

    state.requests.lock().unwrap().push(Captured {
        path: "/v1/chat/create_embeddingLB",
        api_key: api_key(&headers),
        json: None,
        fields,
    });
    (state.status, Json(state.reply.clone()))
}

/// A listener that accepts connections and drops them without answering.
pub struct DroppingServer {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
}

impl DroppingServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&accepted);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                drop(stream);
            }
        });

        Self { addr, accepted }
    }

    pub fn host_name_port(&self) -> String {
        self.addr.to_string()
    }

    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

/// An address nothing listens on.
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}
