use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

use outlet_food_rs::{
    build_app, init_observability, shutdown_observability, Config, Metrics, Repositories,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment()?;
    println!("Configuration loaded successfully");

    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        config.otlp_endpoint(),
        &config.observability.log_level,
        config.observability.enable_json_logging,
    )?;

    info!("Starting outlet-food-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!("Region: {}", config.database.region);

    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    let backend = config.database.backend()?;
    let repositories = Repositories::open(backend, &config.database).await?;
    info!("Repositories initialized successfully ({:?})", backend);

    let app = build_app(&config, &repositories, metrics);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received");
        shutdown_observability().await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
