use reqwest::Client;
use serde::Deserialize;

use super::{endpoint, read_json};
use crate::error::{AppError, Upstream};
use crate::models::YouTubePlaylist;

const MAX_RESULTS: &str = "8";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Option<Vec<SearchItem>>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    playlist_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    channel_title: Option<String>,
    #[serde(default)]
    thumbnails: Option<Thumbnails>,
}

#[derive(Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

impl From<SearchItem> for YouTubePlaylist {
    fn from(item: SearchItem) -> Self {
        YouTubePlaylist {
            title: item.snippet.title,
            url: format!(
                "https://www.youtube.com/playlist?list={}",
                item.id.playlist_id
            ),
            channel: item.snippet.channel_title,
            image: item
                .snippet
                .thumbnails
                .and_then(|t| t.medium)
                .and_then(|m| m.url),
        }
    }
}

/// Playlist search against the YouTube Data API.
#[derive(Clone)]
pub struct YouTubeClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl YouTubeClient {
    pub fn new(http: Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    pub fn ensure_configured(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("YOUTUBE_API_KEY missing".into()))
    }

    pub async fn search_playlists(&self, query: &str) -> Result<Vec<YouTubePlaylist>, AppError> {
        let api_key = self.ensure_configured()?;

        let res = self
            .http
            .get(endpoint(&self.base_url, "/youtube/v3/search"))
            .query(&[
                ("part", "snippet"),
                ("type", "playlist"),
                ("maxResults", MAX_RESULTS),
                ("key", api_key),
                ("q", query),
            ])
            .send()
            .await
            .map_err(|e| AppError::from_reqwest(Upstream::YouTube, e))?;

        let body: SearchResponse = read_json(Upstream::YouTube, res).await?;
        Ok(body
            .items
            .unwrap_or_default()
            .into_iter()
            .map(YouTubePlaylist::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_search_item() {
        let item: SearchItem = serde_json::from_value(json!({
            "kind": "youtube#searchResult",
            "id": { "kind": "youtube#playlist", "playlistId": "PL123" },
            "snippet": {
                "title": "90s Party Mix",
                "channelTitle": "Throwback",
                "thumbnails": {
                    "default": { "url": "https://i.ytimg.com/default.jpg" },
                    "medium": { "url": "https://i.ytimg.com/medium.jpg" }
                }
            }
        }))
        .unwrap();

        assert_eq!(
            YouTubePlaylist::from(item),
            YouTubePlaylist {
                title: "90s Party Mix".into(),
                url: "https://www.youtube.com/playlist?list=PL123".into(),
                channel: Some("Throwback".into()),
                image: Some("https://i.ytimg.com/medium.jpg".into()),
            }
        );
    }

    #[test]
    fn item_without_playlist_id_is_rejected() {
        let parsed = serde_json::from_value::<SearchResponse>(json!({
            "items": [{ "id": { "kind": "youtube#video" }, "snippet": { "title": "x" } }]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_items_means_no_results() {
        let parsed: SearchResponse = serde_json::from_value(json!({ "pageInfo": {} })).unwrap();
        assert!(parsed.items.is_none());
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let client = YouTubeClient::new(Client::new(), "http://localhost".into(), None);
        assert_eq!(
            client.ensure_configured().unwrap_err().to_string(),
            "YOUTUBE_API_KEY missing"
        );
    }
}
