//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use agrovault_core::{ServiceError, ServiceResult};

use crate::model::{ModelClient, ModelReply};
use crate::prompt::Prompt;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed model identifier used for every gateway call.
pub const CHAT_MODEL: &str = "gemini-2.5-flash";
/// Sampling parameters for the assistant persona.
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> ServiceResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::internal(format!("http client build failed: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: CHAT_MODEL.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: Value,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

fn build_request(prompt: &Prompt) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: prompt
            .turns
            .iter()
            .map(|turn| Content {
                role: Some(turn.role.as_str().to_string()),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect(),
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: prompt.system.clone(),
            }],
        },
        generation_config: json!({
            "temperature": TEMPERATURE,
            "maxOutputTokens": MAX_OUTPUT_TOKENS,
        }),
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, prompt: &Prompt) -> ServiceResult<ModelReply> {
        let request = build_request(prompt);

        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::upstream(format!("Error calling Gemini API: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unavailable>".to_string());
            tracing::error!(%status, "model call failed");
            return Err(ServiceError::upstream(format!(
                "Error calling Gemini API: {status}: {body}"
            )));
        }

        response
            .json::<ModelReply>()
            .await
            .map_err(|e| ServiceError::upstream(format!("Error decoding Gemini response: {e}")))
    }
}
