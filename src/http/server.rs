//! HTTP server setup and bounded graceful drain.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, request timeout)
//! - Bind the listener separately from serving
//! - Drain in-flight requests on shutdown, bounded by the grace period

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::observability::ObservationSink;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Sink the application handler records observations into.
    pub sink: Arc<dyn ObservationSink>,

    /// Recorder handle the metrics endpoint renders from; `None` disables
    /// the endpoint.
    pub metrics: Option<PrometheusHandle>,
}

/// How a drain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every in-flight request finished within the grace period.
    Completed,

    /// The grace period elapsed first; remaining connections were abandoned.
    GracePeriodExpired,
}

/// HTTP server for the service: application traffic, health probe, and
/// metrics on one port.
pub struct AppServer {
    listener: TcpListener,
    router: Router,
}

impl AppServer {
    /// Bind the listener and build the router.
    ///
    /// Kept separate from [`AppServer::serve`] so a port-bind failure
    /// surfaces as its own fatal startup error.
    pub async fn bind(
        addr: SocketAddr,
        state: AppState,
        request_timeout: Duration,
    ) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(address = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            router: build_router(state, request_timeout),
        })
    }

    /// The bound local address.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    /// Serve until `drain` fires, then drain within `grace`.
    pub async fn serve(
        self,
        drain: broadcast::Receiver<()>,
        grace: Duration,
    ) -> Result<DrainOutcome, std::io::Error> {
        serve(self.listener, self.router, drain, grace).await
    }
}

/// Build the Axum router with all middleware layers.
fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .route("/metrics", get(metrics_snapshot))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Serve `router` on `listener` until `drain` fires.
///
/// After the drain signal the listener stops accepting and in-flight
/// requests get up to `grace` to finish; whatever is still running then is
/// abandoned by dropping the server future.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut drain: broadcast::Receiver<()>,
    grace: Duration,
) -> Result<DrainOutcome, std::io::Error> {
    let mut deadline_rx = drain.resubscribe();

    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown(
        async move {
            let _ = drain.recv().await;
            tracing::info!("Drain signal received, listener closing");
        },
    );

    let deadline = async move {
        let _ = deadline_rx.recv().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result?;
            tracing::info!("In-flight requests drained");
            Ok(DrainOutcome::Completed)
        }
        () = deadline => {
            tracing::warn!(grace_secs = grace.as_secs_f64(), "Grace period expired, abandoning in-flight requests");
            Ok(DrainOutcome::GracePeriodExpired)
        }
    }
}

/// Liveness probe. Success means "able to serve", nothing more.
async fn health() -> &'static str {
    "ok"
}

/// Application handler.
async fn hello(State(state): State<AppState>) -> &'static str {
    let start = Instant::now();
    let body = "hello world";
    state.sink.observe("hello", start.elapsed());
    body
}

/// Prometheus text exposition of the installed recorder.
async fn metrics_snapshot(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
