use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct DescriptionRequest {
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /api/partyplaner4`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPlanRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub with_deco: bool,
    #[serde(default)]
    pub with_invite: bool,
    #[serde(default)]
    pub with_budget: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub result: String,
}
