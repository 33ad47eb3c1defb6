use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use herald::config::{self, ServiceConfig};
use herald::lifecycle::{signals, Coordinator};
use herald::observability::{self, PrometheusSink};
use herald::registry::ConsulRegistry;

#[derive(Parser)]
#[command(name = "herald", version)]
#[command(about = "Self-registering HTTP service with Consul-based discovery", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        name = %config.service.name,
        port = config.service.port,
        registry = %config.registry.address,
        "herald starting"
    );

    let metrics = if config.observability.metrics_enabled {
        Some(observability::install_recorder()?)
    } else {
        None
    };

    let registry = Arc::new(ConsulRegistry::new(&config.registry)?);
    let coordinator = Coordinator::new(config, registry, Arc::new(PrometheusSink), metrics);

    let shutdown = coordinator.shutdown_handle();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    coordinator.run().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
