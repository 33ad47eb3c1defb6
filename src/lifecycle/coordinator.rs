//! Lifecycle coordination.
//!
//! # Responsibilities
//! - Own the only cross-cutting control flow: startup order, the single
//!   blocking signal wait, and shutdown order
//! - Own the registration record for the lifetime of the process
//!
//! # State Machine
//! ```text
//! Initializing → Registered → Serving → Draining → Terminated
//! ```
//! Any failure before `Serving` is fatal and ends in `Terminated` with
//! nothing left registered.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::http::{AppServer, AppState, DrainOutcome};
use crate::lifecycle::Shutdown;
use crate::net::resolver::{self, ResolveError};
use crate::observability::ObservationSink;
use crate::registry::{RegistryError, ServiceInstance, ServiceRegistry};

/// Coordinator states. Transitions only move rightward; `Terminated` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Initializing,
    Registered,
    Serving,
    Draining,
    Terminated,
}

/// Fatal startup errors. Everything after `Serving` is reported, not
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("address resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("registration failed: {0}")]
    Registration(#[from] RegistryError),

    #[error("listener start failed: {0}")]
    ListenerStart(#[source] std::io::Error),
}

/// Orchestrates the registration/serve/drain lifecycle.
///
/// Owns the registry client, the server handle, and the instance identity —
/// they are fields here rather than process-wide state.
pub struct Coordinator {
    config: ServiceConfig,
    registry: Arc<dyn ServiceRegistry>,
    sink: Arc<dyn ObservationSink>,
    metrics: Option<PrometheusHandle>,
    shutdown: Shutdown,
    signal_rx: broadcast::Receiver<()>,
}

impl Coordinator {
    pub fn new(
        config: ServiceConfig,
        registry: Arc<dyn ServiceRegistry>,
        sink: Arc<dyn ObservationSink>,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        let shutdown = Shutdown::new();
        // Subscribed here, not in run(), so a signal arriving between
        // construction and the wait is not lost.
        let signal_rx = shutdown.subscribe();

        Self {
            config,
            registry,
            sink,
            metrics,
            shutdown,
            signal_rx,
        }
    }

    /// Handle used to trigger shutdown from outside (signal task, tests).
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Run the full lifecycle to completion.
    ///
    /// Blocks until a shutdown trigger has been observed and the drain has
    /// finished (or its grace period expired).
    pub async fn run(mut self) -> Result<(), LifecycleError> {
        let mut state = LifecycleState::Initializing;

        let address = resolver::resolve(&self.config.resolver)?;
        let instance = ServiceInstance::new(
            &self.config.service.name,
            address,
            self.config.service.port,
            &self.config.health_check,
        );

        self.registry.register(&instance).await?;
        enter(&mut state, LifecycleState::Registered);
        tracing::info!(
            id = %instance.id,
            name = %instance.name,
            address = %instance.address,
            port = instance.port,
            "Registered with discovery registry"
        );

        let bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), instance.port);
        let app_state = AppState {
            sink: Arc::clone(&self.sink),
            metrics: self.metrics.clone(),
        };
        let server = match AppServer::bind(
            bind_addr,
            app_state,
            self.config.service.request_timeout(),
        )
        .await
        {
            Ok(server) => server,
            Err(error) => {
                // Already registered; clean up so the fatal bind error does
                // not leave a stale record behind.
                self.deregister(&instance).await;
                enter(&mut state, LifecycleState::Terminated);
                return Err(LifecycleError::ListenerStart(error));
            }
        };

        let drain = Shutdown::new();
        let drain_rx = drain.subscribe();
        let grace = self.config.shutdown.grace_period();
        let serve_task = tokio::spawn(server.serve(drain_rx, grace));
        enter(&mut state, LifecycleState::Serving);

        // The single blocking wait: exactly one termination notification.
        let _ = self.signal_rx.recv().await;

        enter(&mut state, LifecycleState::Draining);
        // Deregister first so discovery stops routing new traffic before the
        // listener closes.
        self.deregister(&instance).await;

        drain.trigger();
        match serve_task.await {
            Ok(Ok(DrainOutcome::Completed)) => {}
            Ok(Ok(DrainOutcome::GracePeriodExpired)) => {
                // Already reported by the server; accepted data-loss boundary.
            }
            Ok(Err(error)) => {
                tracing::warn!(error = %error, "Listener failed while draining");
            }
            Err(error) => {
                tracing::warn!(error = %error, "Serve task aborted while draining");
            }
        }

        enter(&mut state, LifecycleState::Terminated);
        Ok(())
    }

    /// Best-effort deregistration. Failure is reported, never propagated:
    /// the registry's deregister-critical-after purge is the backstop.
    async fn deregister(&self, instance: &ServiceInstance) {
        match self.registry.deregister(&instance.id).await {
            Ok(()) => tracing::info!(id = %instance.id, "Deregistered from discovery registry"),
            Err(error @ RegistryError::Rejected { .. }) => {
                tracing::warn!(id = %instance.id, error = %error, "Registry refused deregistration");
            }
            Err(error) => {
                tracing::warn!(id = %instance.id, error = %error, "Deregistration failed");
            }
        }
    }
}

fn enter(state: &mut LifecycleState, next: LifecycleState) {
    tracing::info!(from = ?state, to = ?next, "Lifecycle transition");
    *state = next;
}
