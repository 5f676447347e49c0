//! OpenAPI specification gateway.
//!
//! Serves a static OpenAPI document in JSON or YAML and fronts the
//! documentation UI with a redirect filter.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                  GATEWAY                     │
//!                        │                                              │
//!     GET /openapi       │  ┌──────────┐   ┌─────────────┐              │
//!     ───────────────────┼─▶│   http   │──▶│ negotiation │──┐           │
//!                        │  │  server  │   └─────────────┘  │           │
//!                        │  │          │                    ▼           │
//!                        │  │          │              ┌──────────┐      │
//!                        │  │          │              │ document │◀──┐  │
//!                        │  │          │              │   slot   │   │  │
//!     GET /api-specs/ui  │  │          │   ┌─────────┐└──────────┘   │  │
//!     ───────────────────┼─▶│          │──▶│ gateway │───────────────┘  │
//!     ◀── 302 / assets ──┼──│          │   └─────────┘ (server list)    │
//!                        │  └──────────┘                                │
//!                        │                                              │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use openapi_gateway::config::{load_and_watch, load_config, GatewayConfig};
use openapi_gateway::document::DocumentSlot;
use openapi_gateway::lifecycle::{signals::wait_for_signal, Shutdown};
use openapi_gateway::observability::{logging, metrics};
use openapi_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "openapi-gateway")]
#[command(about = "Serve an OpenAPI document and its documentation UI", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("openapi-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        spec_mapping = %config.spec.mapping,
        ui_mapping = %config.ui.mapping,
        request_timeout_secs = config.timeouts.request_secs,
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

    let documents = Arc::new(DocumentSlot::new());
    let _watcher = load_and_watch(&config.document, &documents);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, documents);
    let server_task = tokio::spawn(server.run(listener, shutdown.clone()));
    tokio::spawn(async move { wait_for_signal(&shutdown).await });

    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
