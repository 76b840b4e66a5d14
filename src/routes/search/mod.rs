mod handler;
mod model;

use axum::{Router, routing::get};

use crate::AppState;

pub use handler::{spotify_search, youtube_search};
pub use model::{SearchQuery, SearchResults};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/spotify/search", get(spotify_search))
        .route("/youtube/search", get(youtube_search))
}
