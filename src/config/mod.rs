use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// CORS policy derived from `ALLOWED_ORIGINS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        match origins.as_slice() {
            [] => AllowedOrigins::Any,
            [only] if only == "*" => AllowedOrigins::Any,
            _ => AllowedOrigins::List(origins),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub spotify_accounts_url: String,
    pub spotify_api_base_url: String,
    pub youtube_api_key: Option<String>,
    pub youtube_api_base_url: String,
    pub allowed_origins: AllowedOrigins,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values
    /// are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let server_host = match get("SERVER_HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_HOST",
                value: v,
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let server_port = match get("PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: v })?,
            None => 3000,
        };
        let upstream_timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "UPSTREAM_TIMEOUT_SECS",
                value: v,
            })?,
            None => 15,
        };

        Ok(Config {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: or("OPENAI_MODEL", "gpt-4o-mini"),
            openai_base_url: or("OPENAI_BASE_URL", "https://api.openai.com"),
            spotify_client_id: get("SPOTIFY_CLIENT_ID"),
            spotify_client_secret: get("SPOTIFY_CLIENT_SECRET"),
            spotify_accounts_url: or("SPOTIFY_ACCOUNTS_URL", "https://accounts.spotify.com"),
            spotify_api_base_url: or("SPOTIFY_API_BASE_URL", "https://api.spotify.com"),
            youtube_api_key: get("YOUTUBE_API_KEY"),
            youtube_api_base_url: or("YOUTUBE_API_BASE_URL", "https://www.googleapis.com"),
            allowed_origins: AllowedOrigins::parse(&or("ALLOWED_ORIGINS", "*")),
            server_host,
            server_port,
            upstream_timeout_secs,
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
