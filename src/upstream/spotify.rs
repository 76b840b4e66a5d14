use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{endpoint, read_json};
use crate::cache::{CredentialExchange, IssuedToken};
use crate::error::{AppError, Upstream};
use crate::models::SpotifyPlaylist;

const SEARCH_LIMIT: &str = "8";
const SEARCH_MARKET: &str = "DE";

#[derive(Debug, Default, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Client-credentials exchange against the Spotify accounts service.
#[derive(Clone)]
pub struct SpotifyCredentialExchange {
    http: Client,
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl SpotifyCredentialExchange {
    pub fn new(
        http: Client,
        accounts_url: &str,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            http,
            token_url: endpoint(accounts_url, "/api/token"),
            client_id,
            client_secret,
        }
    }
}

#[async_trait]
impl CredentialExchange for SpotifyCredentialExchange {
    async fn exchange(&self) -> Result<IssuedToken, AppError> {
        let (Some(client_id), Some(client_secret)) =
            (self.client_id.as_deref(), self.client_secret.as_deref())
        else {
            return Err(AppError::Configuration("Spotify credentials missing".into()));
        };

        debug!(token_url = %self.token_url, "requesting client-credentials token");
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::from_reqwest(Upstream::SpotifyAccounts, e))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| AppError::from_reqwest(Upstream::SpotifyAccounts, e))?;
        let body: TokenResponse = serde_json::from_str(&text).unwrap_or_default();

        match body.access_token.filter(|t| !t.is_empty()) {
            Some(access_token) if status.is_success() => Ok(IssuedToken {
                access_token,
                expires_in: body.expires_in,
            }),
            _ => {
                warn!(%status, "token endpoint rejected client credentials");
                Err(AppError::CredentialExchange(
                    body.error_description
                        .unwrap_or_else(|| "Spotify token error".to_string()),
                ))
            }
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    playlists: Option<PlaylistPage>,
}

#[derive(Deserialize)]
struct PlaylistPage {
    #[serde(default)]
    items: Option<Vec<Option<PlaylistItem>>>,
}

#[derive(Deserialize)]
struct PlaylistItem {
    name: String,
    #[serde(default)]
    external_urls: Option<ExternalUrls>,
    #[serde(default)]
    owner: Option<Owner>,
    #[serde(default)]
    tracks: Option<TrackRef>,
    #[serde(default)]
    images: Option<Vec<Image>>,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Deserialize)]
struct Owner {
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct TrackRef {
    total: Option<u64>,
}

#[derive(Deserialize)]
struct Image {
    url: Option<String>,
}

impl From<PlaylistItem> for SpotifyPlaylist {
    fn from(item: PlaylistItem) -> Self {
        SpotifyPlaylist {
            title: item.name,
            url: item.external_urls.and_then(|u| u.spotify),
            owner: item.owner.and_then(|o| o.display_name),
            tracks: item.tracks.and_then(|t| t.total),
            image: item
                .images
                .and_then(|images| images.into_iter().next())
                .and_then(|i| i.url),
        }
    }
}

impl SearchResponse {
    fn into_playlists(self) -> Vec<SpotifyPlaylist> {
        self.playlists
            .and_then(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(SpotifyPlaylist::from)
            .collect()
    }
}

/// Playlist search against the Spotify Web API.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    pub async fn search_playlists(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Vec<SpotifyPlaylist>, AppError> {
        let res = self
            .http
            .get(endpoint(&self.base_url, "/v1/search"))
            .bearer_auth(token)
            .query(&[
                ("type", "playlist"),
                ("limit", SEARCH_LIMIT),
                ("market", SEARCH_MARKET),
                ("q", query),
            ])
            .send()
            .await
            .map_err(|e| AppError::from_reqwest(Upstream::Spotify, e))?;

        let body: SearchResponse = read_json(Upstream::Spotify, res).await?;
        Ok(body.into_playlists())
    }
}
