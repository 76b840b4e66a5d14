use axum::extract::{Json, Query, State};
use tracing::info;

use crate::{
    AppState,
    error::AppError,
    models::{SpotifyPlaylist, YouTubePlaylist},
};

use super::model::{SearchQuery, SearchResults};

fn require_query(q: Option<String>) -> Result<String, AppError> {
    q.map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Missing q".into()))
}

#[axum::debug_handler]
pub async fn spotify_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults<SpotifyPlaylist>>, AppError> {
    let q = require_query(params.q)?;

    let token = state.spotify_tokens.get_token().await?;
    let results = state.spotify.search_playlists(&token, &q).await?;

    info!(query = %q, count = results.len(), "spotify search");
    Ok(Json(SearchResults { results }))
}

#[axum::debug_handler]
pub async fn youtube_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults<YouTubePlaylist>>, AppError> {
    state.youtube.ensure_configured()?;
    let q = require_query(params.q)?;

    let results = state.youtube.search_playlists(&q).await?;

    info!(query = %q, count = results.len(), "youtube search");
    Ok(Json(SearchResults { results }))
}
