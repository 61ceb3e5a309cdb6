use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;

use power_load_monitor::api::create_router;
use power_load_monitor::cli::Cli;
use power_load_monitor::config::Config;
use power_load_monitor::error::AppError;
use power_load_monitor::logging::init_logging;
use power_load_monitor::metrics::AppMetrics;
use power_load_monitor::queries::PowerQueries;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    if let Err(err) = run(Cli::parse()).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env()
        .and_then(|config| config.with_cli(&cli))
        .map_err(AppError::Config)?;

    tracing::info!(
        "Starting with data source '{}', channel {}, archive {}",
        config.data_source,
        config.channel_id,
        config.archive_path.display()
    );

    let metrics = Arc::new(
        AppMetrics::new().map_err(|err| AppError::Internal(format!("metrics setup: {}", err)))?,
    );
    let queries = Arc::new(PowerQueries::from_config(&config, metrics.clone())?);
    let app = create_router(queries, metrics, &config.cors_allowed_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {}: {}", addr, err)))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {}", err)))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
    tracing::info!("Shutting down");
}
