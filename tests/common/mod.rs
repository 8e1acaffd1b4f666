//! Shared utilities for integration testing.

use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use item_relay::config::RelayConfig;
use item_relay::http::HttpServer;
use item_relay::lifecycle::Shutdown;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

type Responder = Arc<dyn Fn(Option<String>) -> (u16, String) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    calls: Arc<AtomicU32>,
    seen: Arc<Mutex<Vec<Option<String>>>>,
    respond: Responder,
    delay: Duration,
}

/// A running mock upstream item server.
pub struct MockUpstream {
    pub addr: SocketAddr,
    calls: Arc<AtomicU32>,
    seen: Arc<Mutex<Vec<Option<String>>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests the upstream has received.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Decoded `query` values in arrival order.
    pub fn seen_queries(&self) -> Vec<Option<String>> {
        self.seen.lock().unwrap().clone()
    }
}

async fn item_endpoint(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let query = params.get("query").cloned();
    state.seen.lock().unwrap().push(query.clone());

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    let (status, body) = (state.respond)(query);
    (
        StatusCode::from_u16(status).unwrap(),
        [(CONTENT_TYPE, "application/json")],
        body,
    )
}

/// Start a programmable upstream on an ephemeral port.
///
/// `f` receives the decoded `query` parameter and returns status and body.
#[allow(dead_code)]
pub async fn start_programmable_upstream<F>(f: F) -> MockUpstream
where
    F: Fn(Option<String>) -> (u16, String) + Send + Sync + 'static,
{
    start_upstream(Duration::ZERO, f).await
}

/// Start an upstream that waits `delay` before answering with `body`.
#[allow(dead_code)]
pub async fn start_slow_upstream(delay: Duration, body: &'static str) -> MockUpstream {
    start_upstream(delay, move |_| (200, body.to_string())).await
}

async fn start_upstream<F>(delay: Duration, f: F) -> MockUpstream
where
    F: Fn(Option<String>) -> (u16, String) + Send + Sync + 'static,
{
    let calls = Arc::new(AtomicU32::new(0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        calls: calls.clone(),
        seen: seen.clone(),
        respond: Arc::new(f),
        delay,
    };

    let app = Router::new()
        .route("/api/server/get-call-obj", get(item_endpoint))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, calls, seen }
}

/// Start a mock upstream that always returns the same item JSON.
#[allow(dead_code)]
pub async fn start_mock_upstream(body: &'static str) -> MockUpstream {
    start_programmable_upstream(move |_| (200, body.to_string())).await
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Relay config pointing at `base_url`, with proxies disabled.
pub fn relay_config(base_url: String) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = base_url;
    config.upstream.use_system_proxy = false;
    config
}

/// Start the relay on an ephemeral port; returns its address and shutdown handle.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Like [`start_relay`], but also returns the server task so a test can
/// observe it finishing after shutdown.
#[allow(dead_code)]
pub async fn start_relay_with_handle(
    config: RelayConfig,
) -> (SocketAddr, Shutdown, tokio::task::JoinHandle<Result<(), std::io::Error>>) {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(server.run(listener, server_shutdown));

    (addr, shutdown, handle)
}

/// Test-side HTTP client that ignores proxy environment variables.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
