//! Adapters for the third-party APIs this service proxies.
//!
//! Each adapter builds the upstream request, sends it through the shared
//! [`reqwest::Client`] and turns the answer into a local shape or an
//! [`AppError`].

pub mod openai;
pub mod spotify;
pub mod youtube;

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::warn;

use crate::error::{AppError, Upstream};

pub use openai::{ChatMessage, OpenAiClient};
pub use spotify::{SpotifyClient, SpotifyCredentialExchange};
pub use youtube::YouTubeClient;

/// Builds the HTTP client shared by every adapter. `timeout` bounds each
/// outbound request end to end.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Reads an upstream response body.
///
/// Error statuses become [`AppError::Upstream`] carrying the body (wrapped as
/// `{"error": text}` when it is not JSON). Success bodies must deserialize
/// into `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    upstream: Upstream,
    res: Response,
) -> Result<T, AppError> {
    let status = res.status();
    let text = res
        .text()
        .await
        .map_err(|e| AppError::from_reqwest(upstream, e))?;

    if !status.is_success() {
        warn!(%upstream, %status, "upstream returned an error status");
        let body = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| json!({ "error": text }));
        return Err(AppError::Upstream {
            upstream,
            status,
            body,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        warn!(%upstream, error = %e, "upstream response has an unexpected shape");
        AppError::MalformedUpstreamResponse {
            upstream,
            reason: e.to_string(),
        }
    })
}

/// Joins a configured base URL and an absolute path.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
