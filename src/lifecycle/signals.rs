//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGINT (Ctrl+C) and SIGTERM
//! - Translate the first signal into the shutdown notification
//!
//! # Design Decisions
//! - These two signals are the sole trigger for draining; nothing else is
//!   handled
//! - Non-unix platforms only get Ctrl+C

/// Wait for the first termination signal.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C"),
        () = terminate => tracing::info!("Received SIGTERM"),
    }
}
