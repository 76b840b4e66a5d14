use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    AppState,
    error::{AppError, Upstream},
    models::MusicPlan,
};

use super::{
    model::{DescriptionRequest, FullPlanRequest, PlanResponse},
    prompts,
};

/// Unwraps a JSON body, treating a missing or unreadable body as empty.
/// Only an oversized body is an error of its own.
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::PayloadTooLarge)
        }
        Err(rejection) => {
            debug!(status = %rejection.status(), "ignoring unusable request body: {}", rejection.body_text());
            Ok(T::default())
        }
    }
}

fn require_description(description: Option<String>) -> Result<String, AppError> {
    description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing description".into()))
}

/// Models sometimes wrap JSON in a markdown fence despite being told not to.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Checks the reply against the [`MusicPlan`] shape and returns it untouched,
/// so keys the model adds beyond that shape reach the client.
fn parse_music_plan(reply: &str) -> Result<(MusicPlan, Value), AppError> {
    let malformed = |e: serde_json::Error| AppError::MalformedUpstreamResponse {
        upstream: Upstream::OpenAi,
        reason: e.to_string(),
    };
    let value: Value = serde_json::from_str(strip_code_fence(reply)).map_err(malformed)?;
    let plan = MusicPlan::deserialize(&value).map_err(malformed)?;
    Ok((plan, value))
}

#[axum::debug_handler]
pub async fn music_plan(
    State(state): State<AppState>,
    body: Result<Json<DescriptionRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    state.openai.ensure_configured()?;
    let description = require_description(body_or_default(body)?.description)?;

    let reply = state
        .openai
        .complete(&prompts::music_plan(&description), prompts::MUSIC_PLAN_MAX_TOKENS)
        .await?;
    let (plan, reply) = parse_music_plan(&reply)?;

    info!(
        spotify = plan.spotify.len(),
        youtube = plan.youtube.len(),
        "music plan generated"
    );
    Ok(Json(reply))
}

#[axum::debug_handler]
pub async fn drinks_and_snacks(
    State(state): State<AppState>,
    body: Result<Json<DescriptionRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>, AppError> {
    state.openai.ensure_configured()?;
    let description = require_description(body_or_default(body)?.description)?;

    let result = state
        .openai
        .complete(
            &prompts::drinks_and_snacks(&description),
            prompts::DRINKS_AND_SNACKS_MAX_TOKENS,
        )
        .await?;
    Ok(Json(PlanResponse { result }))
}

#[axum::debug_handler]
pub async fn drinking_games(State(state): State<AppState>) -> Result<Json<PlanResponse>, AppError> {
    let result = state
        .openai
        .complete(&prompts::drinking_games(), prompts::DRINKING_GAMES_MAX_TOKENS)
        .await?;
    Ok(Json(PlanResponse { result }))
}

#[axum::debug_handler]
pub async fn full_plan(
    State(state): State<AppState>,
    body: Result<Json<FullPlanRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>, AppError> {
    state.openai.ensure_configured()?;
    let req = body_or_default(body)?;
    let description = require_description(req.description.clone())?;

    let result = state
        .openai
        .complete(
            &prompts::full_plan(&description, &req),
            prompts::FULL_PLAN_MAX_TOKENS,
        )
        .await?;
    Ok(Json(PlanResponse { result }))
}
