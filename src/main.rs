use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod openapi;
mod routes;
mod services;
mod state;

#[cfg(test)]
mod test_support;

use config::Config;
use routes::build_app;
use services::hr_api::HrApiClient;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ─── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tally_dashboard=debug,tower_http=info")),
        )
        .with_max_level(Level::TRACE)
        .init();

    // ─── Config ───────────────────────────────────────────────────────────────
    let config = Config::from_env();
    let addr = config.server_addr();

    // ─── Upstream HR API ──────────────────────────────────────────────────────
    let api = HrApiClient::new(&config)?;
    info!("Reading HR data from {}", config.upstream_base_url);

    // ─── App State ────────────────────────────────────────────────────────────
    let state = AppState::new(Arc::new(api), config);
    let app = build_app(state);

    // ─── Start Server ─────────────────────────────────────────────────────────
    info!("🚀 Tally HR Dashboard listening on http://{}", addr);
    info!("📖 Swagger UI:  http://{}/docs", addr);
    info!("❤️  Health:      http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
