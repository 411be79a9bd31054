//! Client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::service::{AdvisoryError, AdvisoryRequest, AdvisoryService};
use crate::{config::AdvisoryConfig, models::Role};

/// Returned when the service answers without any text part.
const EMPTY_REPLY: &str = "{}";

/// Hosted advisory backend.
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    temperature: f32,
    http: Client,
}

impl GeminiClient {
    /// Create a new client from configuration.
    pub fn from_config(config: &AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let api_key = config.api_key.clone().ok_or(AdvisoryError::MissingApiKey)?;
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_request_body(&self, request: &AdvisoryRequest) -> Value {
        let mut contents: Vec<Value> = request
            .history
            .iter()
            .map(|message| {
                json!({
                    "role": message.role.as_str(),
                    "parts": [{ "text": message.text }],
                })
            })
            .collect();
        contents.push(json!({
            "role": Role::User.as_str(),
            "parts": [{ "text": request.user_input }],
        }));

        json!({
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "contents": contents,
            "generationConfig": {
                "temperature": self.temperature,
                "responseMimeType": "application/json",
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Joins the text parts of the first candidate.
fn reply_text(response: GenerateResponse) -> String {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.is_empty() {
        EMPTY_REPLY.to_string()
    } else {
        text
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl AdvisoryService for GeminiClient {
    async fn generate(&self, request: AdvisoryRequest) -> Result<String, AdvisoryError> {
        debug!(
            "Calling {} with {} history messages",
            self.model,
            request.history.len()
        );
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request_body(&request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AdvisoryError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| AdvisoryError::InvalidResponse(e.to_string()))?;
        Ok(reply_text(parsed))
    }
}
