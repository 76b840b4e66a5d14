use serde::{Deserialize, Serialize};

/// Playlist ideas per platform, as produced by the music-curator prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicPlan {
    pub spotify: Vec<Suggestion>,
    pub youtube: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
