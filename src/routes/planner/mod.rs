mod handler;
mod model;
mod prompts;

use axum::{Router, routing::post};

use crate::AppState;

pub use handler::{drinking_games, drinks_and_snacks, full_plan, music_plan};
pub use model::{DescriptionRequest, FullPlanRequest, PlanResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ai/music-plan", post(music_plan))
        .route("/api/partyplaner1", post(drinks_and_snacks))
        .route("/api/partyplaner2", post(drinking_games))
        .route("/api/partyplaner4", post(full_plan))
}
