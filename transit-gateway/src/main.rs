use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_gateway::bus::BusClient;
use transit_gateway::config::GatewayConfig;
use transit_gateway::schema;
use transit_gateway::train::TrainClient;
use transit_gateway::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "transit_gateway=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = GatewayConfig::from_env()?;
    info!(
        bus = %config.bus.base_url,
        train = %config.train.base_url,
        timeout = ?config.upstream_timeout(),
        "configured providers"
    );

    // Clients are built once and shared by every request
    let bus = BusClient::new(config.bus.clone())?;
    let train = TrainClient::new(config.train.clone())?;
    let app = create_router(AppState::new(bus, train));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Transit gateway listening on http://{}", listener.local_addr()?);

    info!("  GET  /health");
    info!("  GET  /docs/openapi.json");
    for endpoint in schema::all() {
        info!("  GET  {:<42} {}", endpoint.path, endpoint.summary);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
