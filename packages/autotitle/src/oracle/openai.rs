//! OpenAI implementation of the title oracle.
//!
//! Sends the title prompt as a chat completion with strict structured
//! output, so the model answers with `{"title": "..."}`.
//!
//! # Example
//!
//! ```rust,ignore
//! use autotitle::oracle::OpenAiOracle;
//!
//! let oracle = OpenAiOracle::new("sk-...").with_model("gpt-4o-mini");
//! let titler = Titler::new(host, oracle, settings)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OracleError, OracleResult, Result};
use crate::pipeline::prompts::TitleRequest;
use crate::security::ApiKey;
use crate::traits::oracle::TitleOracle;
use crate::types::config::{Settings, DEFAULT_MODEL};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "You write short, descriptive titles for personal notes.";

/// Title oracle backed by the OpenAI chat completions API.
#[derive(Clone)]
pub struct OpenAiOracle {
    client: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl OpenAiOracle {
    /// Create a new oracle with the given API key.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from user settings, failing when no key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let key = settings.require_api_key()?;
        Ok(Self::new(key.clone()).with_model(settings.model_id.clone()))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, local servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, request: &TitleRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.prompt.clone(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: "title_response".to_string(),
                    strict: true,
                    schema: request.schema.clone(),
                },
            },
        }
    }
}

#[async_trait]
impl TitleOracle for OpenAiOracle {
    async fn complete(&self, request: &TitleRequest) -> OracleResult<String> {
        let body = self.build_request(request);
        debug!(model = %self.model, prompt_chars = request.prompt.len(), "Sending title request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OracleError::Api(format!("{}: {}", status, error_text)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedJson(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(OracleError::MissingResponse)
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    // Null when the model refuses.
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TitleError;

    #[test]
    fn test_request_uses_strict_schema() {
        let oracle = OpenAiOracle::new("sk-test").with_model("gpt-4o");
        let request = oracle.build_request(&TitleRequest::new("Context."));
        let body = serde_json::to_value(request).unwrap();

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["messages"][0]["role"], "system");
        assert!(body["messages"][1]["content"].as_str().unwrap().ends_with("Context."));
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "title_response");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert_eq!(
            body["response_format"]["json_schema"]["schema"]["required"],
            serde_json::json!(["title"])
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings::new("sk-test").with_model("gpt-4.1-mini");
        let oracle = OpenAiOracle::from_settings(&settings).unwrap();
        assert_eq!(oracle.model(), "gpt-4.1-mini");

        let err = OpenAiOracle::from_settings(&Settings::default()).err().unwrap();
        assert!(matches!(err, TitleError::MissingApiKey));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let oracle = OpenAiOracle::new("sk").with_base_url("http://localhost:8080/v1/");
        assert_eq!(oracle.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_refusal_has_no_content() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null,"refusal":"no"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
