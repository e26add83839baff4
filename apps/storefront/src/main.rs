//! # Empório Storefront Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  .env ─► StorefrontConfig ─► Database (migrations) ─► CatalogService    │
//! │                                   │                                     │
//! │                     GeminiClient? ─┴─► AppState ─► axum (HTTP_PORT)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use emporio_core::contact::WhatsAppComposer;
use emporio_db::{CatalogService, Database};
use storefront::ai::{GeminiClient, SeoOptimizer};
use storefront::{create_router, AppState, StorefrontConfig};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Empório storefront...");

    let config = StorefrontConfig::load().context("invalid configuration")?;
    info!(
        port = config.http_port,
        cache_ttl_secs = config.category_cache_ttl.as_secs(),
        retry_attempts = config.category_retry_attempts,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("failed to open the database")?;
    info!("Database ready");

    let catalog = CatalogService::new(db)
        .with_cache_ttl(config.category_cache_ttl)
        .with_retry(config.retry_policy());

    let seo = match &config.gemini_api_key {
        Some(key) => match GeminiClient::new(key.clone(), config.gemini_model.clone()) {
            Ok(client) => {
                info!(model = %client.model(), "SEO generation enabled");
                SeoOptimizer::new(Arc::new(client))
            }
            Err(e) => {
                warn!(error = %e, "Failed to build Gemini client, SEO uses defaults");
                SeoOptimizer::disabled()
            }
        },
        None => {
            info!("GEMINI_API_KEY not set, SEO uses defaults");
            SeoOptimizer::disabled()
        }
    };

    let state = AppState::new(catalog.clone())
        .with_whatsapp(WhatsAppComposer::new(&config.whatsapp_number))
        .with_seo(seo);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    catalog.database().close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
