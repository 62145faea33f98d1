mod config;
mod errors;
mod gateway;
mod models;
mod modes;
mod routes;
mod service;

#[cfg(test)]
mod test_support;

use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::gateway::GeminiGateway;
use crate::service::assistant_service::AssistantService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bizg=debug,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let gateway = GeminiGateway::new(&config.gateway)?;
    info!(model = gateway.model(), "Model gateway ready");
    let assistant = AssistantService::new(gateway);

    // ── Router ────────────────────────────────────────────────────────────────
    let mut app = routes::router(assistant);

    if config.frontend_dist.is_dir() {
        let index = config.frontend_dist.join("index.html");
        app = app.fallback_service(
            ServeDir::new(&config.frontend_dist).not_found_service(ServeFile::new(index)),
        );
        info!("Serving front-end from {}", config.frontend_dist.display());
    } else {
        warn!(
            "Front-end directory {} not found; only the API is served (run `trunk build` in frontend/)",
            config.frontend_dist.display()
        );
    }

    // Permissive CORS lets `trunk serve` on another port reach the API.
    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
