mod plan;
mod search;

pub use plan::{MusicPlan, Suggestion};
pub use search::{SpotifyPlaylist, YouTubePlaylist};
