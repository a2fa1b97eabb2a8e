//! Form builder HTTP server
//!
//! Provides a REST API for saving forms, validating values and computing
//! derived fields.

use anyhow::Result;
use formbuilder_server::{api, config::ServerConfig, workspace};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config.log_filter())?;
    info!("Loaded configuration: {:?}", config);

    // Initialize form workspace
    let workspace = workspace::init_workspace(&config).await?;

    let app = api::create_router(workspace);

    // Start server
    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Forms API: http://{}/v1/forms", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(default_filter: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
