mod api;
mod config;
mod sentiment;
mod storage;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::sentiment::VaderAnalyzer;
use crate::storage::ReviewStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("🚀 Starting Review Analyzer Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Reviews: {:?}", config.storage.reviews_path);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Load seed reviews
    info!("💾 Loading reviews...");
    let reviews = storage::load_reviews(&config.storage.reviews_path)?;
    let store = Arc::new(ReviewStore::new(reviews));
    info!("✅ Review store ready ({} reviews)", store.count().await);

    info!("🧠 Initializing sentiment analyzer...");
    let analyzer = Arc::new(VaderAnalyzer::new());
    info!("✅ Sentiment analyzer ready");

    let state = AppState { store, analyzer };
    let app = api::router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /        - Query reviews (location, start_date, end_date)");
    info!("   POST /        - Submit review (ReviewBody, Location)");
    info!("   GET  /health  - Health check");
    info!("");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;
    use tracing::warn;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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

    info!("🛑 Shutdown signal received");
}
