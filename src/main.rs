mod config;
mod design;
mod error;
mod product;
mod routes;
mod seed;
mod services;
mod state;
mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::AppConfig::from_env();
    let seed = seed::load(&config.public_base_url).expect("embedded seed data is malformed");
    tracing::info!(
        campaigns = seed.campaigns.len(),
        orders = seed.orders.len(),
        templates = seed.templates.len(),
        clipart = seed.clipart.len(),
        "seed data loaded"
    );

    let state = state::AppState::new(&config, seed, Arc::new(store::SystemClock));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(
        port = config.port,
        base_url = %config.public_base_url,
        latency_min_ms = config.latency.min_ms(),
        latency_max_ms = config.latency.max_ms(),
        "merchstand listening"
    );
    axum::serve(listener, app).await.expect("server failed");
}
