//! Push gateway.
//!
//! Relays every HTTP call it receives to a fixed backend origin and hands the
//! origin's status and JSON body back unchanged.
//!
//! ```text
//!     Client Request       ┌──────────────────────────────────────┐
//!     ─────────────────────┼─▶ CORS → request id → trace → relay ─┼──▶ Origin
//!                          │                                      │
//!     Client Response      │   origin status + JSON body, or      │
//!     ◀────────────────────┼── 500 {status, message, error}  ◀────┼─── Origin
//!                          └──────────────────────────────────────┘
//! ```
//!
//! The binary only serves the relay. Notification handling is a library
//! entry point (`notification::NotificationWorker::register`) for the host
//! that owns the platform capabilities; the `[notifications]` section
//! configures that host.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use push_gateway::config::{self, GatewayConfig};
use push_gateway::lifecycle::{signals, Shutdown};
use push_gateway::observability::{logging, metrics};
use push_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "push-gateway")]
#[command(about = "Relay API calls to a fixed origin", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config: GatewayConfig = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::loader::default_config()?,
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("push-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = %config.origin.base_url,
        origin_timeout_secs = config.timeouts.origin_secs,
        cors = config.cors.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    signals::wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;
    tracing::info!("Shutdown complete");
    Ok(())
}
