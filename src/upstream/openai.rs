use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{endpoint, read_json};
use crate::error::{AppError, Upstream};

const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completion endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiClient {
    pub fn new(http: Client, base_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
            model,
        }
    }

    pub fn ensure_configured(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("OPENAI_API_KEY missing".into()))
    }

    /// Sends `messages` and returns the text of the first choice.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, AppError> {
        let api_key = self.ensure_configured()?;

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens,
        };

        debug!(model = %self.model, max_tokens, "sending chat completion");
        let res = self
            .http
            .post(endpoint(&self.base_url, "/v1/chat/completions"))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::from_reqwest(Upstream::OpenAi, e))?;

        let body: Value = read_json(Upstream::OpenAi, res).await?;

        // Some compatible servers answer 200 with an error payload.
        if body.get("error").is_some_and(|e| !e.is_null()) {
            return Err(AppError::Upstream {
                upstream: Upstream::OpenAi,
                status: StatusCode::OK,
                body,
            });
        }

        let response: ChatResponse =
            serde_json::from_value(body).map_err(|e| AppError::MalformedUpstreamResponse {
                upstream: Upstream::OpenAi,
                reason: e.to_string(),
            })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::MalformedUpstreamResponse {
                upstream: Upstream::OpenAi,
                reason: "response has no message content".into(),
            })
    }
}
