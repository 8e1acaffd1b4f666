//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Compose the client service (the composition root)
//! - Create the Axum Router from the explicit route table
//! - Wire up middleware (request ID, tracing, optional timeout)
//! - Serve on a listener until shutdown is signalled

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::client::{ClientResult, ClientService};
use crate::config::RelayConfig;
use crate::http::handlers;
use crate::lifecycle::shutdown;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClientService>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The outbound HTTP client is built here, once, and handed to the service.
    pub fn new(config: RelayConfig) -> ClientResult<Self> {
        let http = ClientService::build_http_client(&config.upstream)?;
        let service = Arc::new(ClientService::new(http, &config.upstream)?);

        tracing::debug!(
            item_uri = %service.item_uri(None),
            "Client service ready"
        );

        let state = AppState { service };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/api/client/get-call-obj", get(handlers::get_call_object))
            .route("/api/client/get-call-list", get(handlers::get_call_list))
            .route("/api/client/post-call", get(handlers::post_call))
            .route("/api/client/exchange-call", get(handlers::exchange_call))
            .with_state(state);

        let router = match config.listener.request_timeout_secs {
            Some(secs) => router.layer(TimeoutLayer::new(Duration::from_secs(secs))),
            None => router,
        };

        router.layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(propagate_request_id_layer()),
        )
    }

    /// Run the server until the shutdown channel fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::notified(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a clone of the router, for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
