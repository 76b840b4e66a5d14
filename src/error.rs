//! Error types shared by the handlers and upstream adapters.
//!
//! [`AppError`] implements [`IntoResponse`] so handlers can return
//! `Result<…, AppError>` and every failure ends up as a JSON body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

/// The external service a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    OpenAi,
    SpotifyAccounts,
    Spotify,
    YouTube,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Upstream::OpenAi => "OpenAI",
            Upstream::SpotifyAccounts => "Spotify accounts",
            Upstream::Spotify => "Spotify",
            Upstream::YouTube => "YouTube",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required key or secret is not configured.
    #[error("{0}")]
    Configuration(String),

    /// A required request field is missing or empty.
    #[error("{0}")]
    Validation(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    /// The upstream answered with an error; status and body are forwarded.
    #[error("{upstream} responded with {status}")]
    Upstream {
        upstream: Upstream,
        status: StatusCode,
        body: Value,
    },

    /// The upstream answered successfully but the payload has the wrong shape.
    #[error("malformed response from {upstream}: {reason}")]
    MalformedUpstreamResponse { upstream: Upstream, reason: String },

    /// The client-credentials exchange was rejected.
    #[error("{0}")]
    CredentialExchange(String),

    #[error("{0} request timed out")]
    Timeout(Upstream),

    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("{upstream} request failed: {source}")]
    Http {
        upstream: Upstream,
        #[source]
        source: reqwest::Error,
    },
}

impl AppError {
    /// Classifies a transport error, separating timeouts from other failures.
    /// The request URL is stripped since query strings can carry API keys.
    pub fn from_reqwest(upstream: Upstream, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(upstream)
        } else {
            AppError::Http {
                upstream,
                source: err.without_url(),
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upstream { status, .. } if !status.is_success() => *status,
            AppError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> Value {
        match self {
            AppError::Upstream { body, .. } => body,
            AppError::MalformedUpstreamResponse {
                upstream: Upstream::OpenAi,
                ..
            } => json!({ "error": "Invalid JSON from model" }),
            AppError::MalformedUpstreamResponse { upstream, .. } => {
                json!({ "error": format!("Invalid response from {upstream}") })
            }
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::warn!(%status, error = %self, "request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}
