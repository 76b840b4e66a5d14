use std::net::SocketAddr;

use party_backend::{AppState, config::Config, routes};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, planner endpoints will fail");
    }
    if config.spotify_client_id.is_none() || config.spotify_client_secret.is_none() {
        tracing::warn!("Spotify client credentials not set, /spotify/search will fail");
    }
    if config.youtube_api_key.is_none() {
        tracing::warn!("YOUTUBE_API_KEY not set, /youtube/search will fail");
    }
    tracing::info!(origins = ?config.allowed_origins, "CORS policy");

    let addr = SocketAddr::new(config.server_host, config.server_port);

    let state = AppState::new(config).expect("Failed to build HTTP client");
    let app = routes::create_router(state);

    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
