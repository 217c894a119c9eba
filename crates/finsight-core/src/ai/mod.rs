//! Pluggable AI backend abstraction
//!
//! Backend-agnostic interface for the text-generation capability: the
//! hosted model is treated as an opaque structured-JSON generator with a
//! request/response contract. Failures are typed so callers can tell
//! "model unreachable" ([`crate::Error::Http`] / [`crate::Error::ModelApi`])
//! from "model returned malformed output"
//! ([`crate::Error::MalformedResponse`]) — and substitute static fallbacks
//! either way.
//!
//! - `AIBackend` trait: the interface for all AI operations
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAICompatibleBackend` (Groq or any
//!   /v1/chat/completions server), `MockBackend` for tests
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (openai_compatible, mock). Default: openai_compatible
//! - `AI_HOST`: Model server URL (default: https://api.groq.com/openai)
//! - `AI_MODEL`: Model name (default: llama-3.1-8b-instant)
//! - `AI_API_KEY`: Bearer key for the hosted API

mod mock;
mod openai_compatible;
pub mod prompts;
pub mod repair;

pub use mock::MockBackend;
pub use openai_compatible::OpenAICompatibleBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    CategorySuggestion, ChatMessage, ChatReply, FinancialContext, FinancialHealth,
    ForecastReport, Insight, Recommendation,
};

/// Trait defining the interface for all AI backends
///
/// Backends must be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Generate textual insights for an expense forecast
    async fn expense_insights(&self, report: &ForecastReport) -> Result<Vec<Insight>>;

    /// Generate investment recommendations for a savings profile
    async fn investment_recommendations(
        &self,
        health: &FinancialHealth,
        balance: f64,
    ) -> Result<Vec<Recommendation>>;

    /// Suggest a category for a transaction
    async fn categorize_transaction(
        &self,
        title: &str,
        amount: f64,
        description: Option<&str>,
    ) -> Result<CategorySuggestion>;

    /// Answer a chat message, optionally grounded in the user's finances
    async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: Option<&FinancialContext>,
    ) -> Result<ChatReply>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Any server implementing the OpenAI chat completions API (Groq, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Returns None when no API key is configured; callers then serve
    /// static fallbacks instead of model output.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "openai_compatible".into());

        match backend.to_lowercase().as_str() {
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            "openai_compatible" | "openai" | "groq" => {
                OpenAICompatibleBackend::from_env().map(AIClient::OpenAICompatible)
            }
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to openai_compatible");
                OpenAICompatibleBackend::from_env().map(AIClient::OpenAICompatible)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn expense_insights(&self, report: &ForecastReport) -> Result<Vec<Insight>> {
        match self {
            AIClient::OpenAICompatible(b) => b.expense_insights(report).await,
            AIClient::Mock(b) => b.expense_insights(report).await,
        }
    }

    async fn investment_recommendations(
        &self,
        health: &FinancialHealth,
        balance: f64,
    ) -> Result<Vec<Recommendation>> {
        match self {
            AIClient::OpenAICompatible(b) => b.investment_recommendations(health, balance).await,
            AIClient::Mock(b) => b.investment_recommendations(health, balance).await,
        }
    }

    async fn categorize_transaction(
        &self,
        title: &str,
        amount: f64,
        description: Option<&str>,
    ) -> Result<CategorySuggestion> {
        match self {
            AIClient::OpenAICompatible(b) => {
                b.categorize_transaction(title, amount, description).await
            }
            AIClient::Mock(b) => b.categorize_transaction(title, amount, description).await,
        }
    }

    async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: Option<&FinancialContext>,
    ) -> Result<ChatReply> {
        match self {
            AIClient::OpenAICompatible(b) => b.chat(message, history, context).await,
            AIClient::Mock(b) => b.chat(message, history, context).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_client_mock() {
        let client = AIClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = AIClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_categorize() {
        let client = AIClient::mock();
        let result = client
            .categorize_transaction("Uber ride home", 24.0, None)
            .await
            .unwrap();
        assert_eq!(result.category, "Transport");
    }
}
