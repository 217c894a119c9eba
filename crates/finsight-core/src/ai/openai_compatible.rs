//! OpenAI-compatible backend implementation
//!
//! Works with any server that implements the OpenAI chat completions API:
//! the hosted Groq endpoint by default, but also vLLM, LocalAI,
//! llama-server, and friends.
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_HOST`: Server URL (default: https://api.groq.com/openai)
//! - `AI_MODEL`: Model name (default: llama-3.1-8b-instant)
//! - `AI_API_KEY`: Bearer key (required for hosted APIs)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    CategorySuggestion, ChatMessage, ChatReply, FinancialContext, FinancialHealth,
    ForecastReport, Insight, Recommendation,
};

use super::repair::clean_and_parse;
use super::{prompts, AIBackend};

const DEFAULT_HOST: &str = "https://api.groq.com/openai";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// OpenAI-compatible backend
///
/// All operations build a (system, user) prompt pair, request a JSON
/// object response, and run the repair parser over whatever comes back.
#[derive(Clone)]
pub struct OpenAICompatibleBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAICompatibleBackend {
    /// Create a new backend without an API key (local servers)
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
        }
    }

    /// Create with a bearer API key (hosted APIs such as Groq)
    pub fn with_api_key(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: Some(api_key.to_string()),
        }
    }

    /// Create from environment variables
    ///
    /// Returns None when `AI_API_KEY` is absent and no explicit `AI_HOST`
    /// points at a keyless local server.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("AI_API_KEY").ok();
        let host = std::env::var("AI_HOST").ok();
        if api_key.is_none() && host.is_none() {
            return None;
        }

        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let mut backend = Self::new(&host, &model);
        backend.api_key = api_key;
        Some(backend)
    }

    /// Structured-generation primitive: one chat completion constrained to
    /// a JSON object, repaired and parsed into a `serde_json::Value`.
    async fn generate_structured(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<Value> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ApiMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ApiMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature,
            max_tokens,
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
            stream: false,
        };

        let mut req_builder = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request);

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ModelApi(format!("{}: {}", status, body)));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::ModelApi("No choices in model response".into()))?;

        debug!(model = %self.model, "Model response: {}", content);

        clean_and_parse(&content)
    }
}

/// Request to the chat completions API
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    response_format: ResponseFormat,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait]
impl AIBackend for OpenAICompatibleBackend {
    async fn expense_insights(&self, report: &ForecastReport) -> Result<Vec<Insight>> {
        let (system, user) = prompts::expense_insights(report);
        let value = self.generate_structured(&system, &user, 0.3, Some(800)).await?;

        let insights = value
            .get("insights")
            .cloned()
            .ok_or_else(|| Error::MalformedResponse("Missing \"insights\" field".into()))?;
        serde_json::from_value(insights)
            .map_err(|e| Error::MalformedResponse(format!("Bad insight shape: {}", e)))
    }

    async fn investment_recommendations(
        &self,
        health: &FinancialHealth,
        balance: f64,
    ) -> Result<Vec<Recommendation>> {
        let (system, user) = prompts::investment_recommendations(health, balance);
        let value = self.generate_structured(&system, &user, 0.3, Some(1000)).await?;

        let recommendations = value
            .get("recommendations")
            .cloned()
            .ok_or_else(|| Error::MalformedResponse("Missing \"recommendations\" field".into()))?;
        serde_json::from_value(recommendations)
            .map_err(|e| Error::MalformedResponse(format!("Bad recommendation shape: {}", e)))
    }

    async fn categorize_transaction(
        &self,
        title: &str,
        amount: f64,
        description: Option<&str>,
    ) -> Result<CategorySuggestion> {
        let (system, user) = prompts::categorize_transaction(title, amount, description);
        let value = self.generate_structured(&system, &user, 0.2, Some(200)).await?;

        serde_json::from_value(value)
            .map_err(|e| Error::MalformedResponse(format!("Bad category shape: {}", e)))
    }

    async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: Option<&FinancialContext>,
    ) -> Result<ChatReply> {
        let (system, user) = prompts::chat(message, history, context);
        let value = self.generate_structured(&system, &user, 0.3, Some(500)).await?;

        let mut reply: ChatReply = serde_json::from_value(value)
            .map_err(|e| Error::MalformedResponse(format!("Bad chat reply shape: {}", e)))?;
        if reply.response.is_empty() {
            reply.response = ChatReply::fallback().response;
        }
        Ok(reply)
    }

    async fn health_check(&self) -> bool {
        let mut req_builder = self.http_client.get(format!("{}/v1/models", self.base_url));
        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }
        match req_builder.send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
