use axum::Json;
use serde_json::{Value, json};

pub async fn health() -> &'static str {
    "ok"
}

pub async fn root() -> Json<Value> {
    Json(json!({ "ok": true }))
}
