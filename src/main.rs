mod auth;
mod config;
mod db;
mod error;
mod links;
mod menus;
mod qr;
mod state;
mod uploads;
mod web_ui;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "menulink=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // Initialize database
    let db = db::init_database(&config.db_path())
        .await
        .expect("Failed to initialize database");
    tracing::info!("Database initialized at {:?}", config.db_path());

    let state = Arc::new(AppState::new(config.clone(), db));
    state
        .uploads
        .ensure_dir()
        .await
        .expect("Failed to create uploads directory");
    tracing::info!("Uploads directory at {:?}", state.uploads.dir());

    // Periodically drop expired sessions
    {
        let state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60 * 60));
            loop {
                interval.tick().await;
                state.auth.cleanup_expired();
            }
        });
    }

    let app = web_ui::router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        .layer(TraceLayer::new_for_http());

    tracing::info!("Menulink starting on http://{}", config.addr);
    match &config.base_url {
        Some(base) => tracing::info!("Public links will use {}", base),
        None => tracing::info!("BASE_URL not set; links will use each request's host"),
    }

    let listener = tokio::net::TcpListener::bind(config.addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
