//! segroute HTTP server
//!
//! Registers the demo, health and metrics routes, starts the timing
//! consumer, and serves every request through the segment-trie router.

use axum::middleware;
use clap::Parser;
use segroute::{
    cli::{Cli, Command, generate_config_template},
    config::Config,
    handlers::{self, AppState},
    metrics::{Metrics, spawn_consumer},
    middleware::request_id_middleware,
    router::Router,
    telemetry,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Command::Config { output }) = cli.command {
        match output {
            Some(path) => {
                std::fs::write(&path, generate_config_template())?;
                println!("Wrote configuration template to {}", path);
            }
            None => print!("{}", generate_config_template()),
        }
        return Ok(());
    }

    let config = Config::from_file(&cli.config)?;

    telemetry::init(&config.observability.log_level);

    let metrics = Arc::new(Metrics::new()?);

    // Registration phase: the router is exclusively owned until `into_app`.
    let (router, timings) = Router::new(&config.metrics);
    let mut router = router.with_metrics(Arc::clone(&metrics));
    handlers::register_all(&mut router, AppState::new(Arc::clone(&metrics)))?;

    tracing::info!(
        routes = router.route_count(),
        channel_capacity = config.metrics.channel_capacity(),
        "Routes registered"
    );

    spawn_consumer(timings, metrics);

    // Serving phase.
    let app = router
        .into_app()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from((config.host_addr()?, config.server.port));

    tracing::info!("Starting segroute server on {}", addr);
    tracing::info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
