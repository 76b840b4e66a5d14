use std::sync::Arc;

use config::Config;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod upstream;

use cache::TokenCache;
use upstream::{OpenAiClient, SpotifyClient, SpotifyCredentialExchange, YouTubeClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub openai: OpenAiClient,
    pub spotify: SpotifyClient,
    pub spotify_tokens: Arc<TokenCache>,
    pub youtube: YouTubeClient,
}

impl AppState {
    /// Wires every upstream adapter to one shared HTTP client.
    pub fn new(config: Config) -> reqwest::Result<Self> {
        let http = upstream::http_client(config.upstream_timeout())?;

        let exchange = SpotifyCredentialExchange::new(
            http.clone(),
            &config.spotify_accounts_url,
            config.spotify_client_id.clone(),
            config.spotify_client_secret.clone(),
        );

        Ok(AppState {
            openai: OpenAiClient::new(
                http.clone(),
                config.openai_base_url.clone(),
                config.openai_api_key.clone(),
                config.openai_model.clone(),
            ),
            spotify: SpotifyClient::new(http.clone(), config.spotify_api_base_url.clone()),
            spotify_tokens: Arc::new(TokenCache::new(Arc::new(exchange))),
            youtube: YouTubeClient::new(
                http,
                config.youtube_api_base_url.clone(),
                config.youtube_api_key.clone(),
            ),
            config: Arc::new(config),
        })
    }
}
