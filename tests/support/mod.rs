//! Scripted SSE server standing in for the generation backend.

#![allow(dead_code)]

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use futures::stream;
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const IMAGE_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0fake-jpeg-body";

/// One event the fixture emits, in order
#[derive(Debug, Clone)]
pub enum Scripted {
    Log(&'static str),
    Complete(Value),
    Named { event: &'static str, data: &'static str },
}

impl Scripted {
    fn to_event(&self) -> Event {
        match self {
            Scripted::Log(message) => Event::default()
                .event("log")
                .data(serde_json::json!({ "message": message }).to_string()),
            Scripted::Complete(payload) => Event::default()
                .event("complete")
                .data(payload.to_string()),
            Scripted::Named { event, data } => Event::default().event(*event).data(*data),
        }
    }
}

#[derive(Clone)]
struct FixtureState {
    script: Arc<Vec<Scripted>>,
    status: Option<StatusCode>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub struct Fixture {
    pub endpoint: String,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    handle: JoinHandle<()>,
}

impl Fixture {
    /// Serve `script` on every `/generate` request
    pub async fn spawn(script: Vec<Scripted>) -> Self {
        Self::start(script, None).await
    }

    /// Answer `/generate` with a plain error status instead of a stream
    pub async fn failing(status: StatusCode) -> Self {
        Self::start(Vec::new(), Some(status)).await
    }

    async fn start(script: Vec<Scripted>, status: Option<StatusCode>) -> Self {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let state = FixtureState {
            script: Arc::new(script),
            status,
            queries: queries.clone(),
        };
        let app = Router::new()
            .route("/generate", get(generate))
            .route("/images/{folder}/{file}", get(image))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{addr}"),
            queries,
            handle,
        }
    }

    /// Query parameters of every `/generate` request received so far
    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn generate(
    State(state): State<FixtureState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.queries.lock().unwrap().push(params);
    if let Some(status) = state.status {
        return (status, "generation unavailable").into_response();
    }
    let events: Vec<Result<Event, Infallible>> =
        state.script.iter().map(|s| Ok(s.to_event())).collect();
    Sse::new(stream::iter(events)).into_response()
}

async fn image(Path((folder, _file)): Path<(String, String)>) -> Response {
    if folder == "missing" {
        return StatusCode::NOT_FOUND.into_response();
    }
    ([(header::CONTENT_TYPE, "image/jpeg")], IMAGE_BYTES).into_response()
}

/// Address nothing is listening on
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
