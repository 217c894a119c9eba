//! HTTP client for the main finance backend.
//!
//! Users, sessions, and transaction storage live in a separate service;
//! this client fetches the unified AI payload (transactions + stats) for a
//! bearer-token-identified user.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::AiData;

const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/api";

/// Client for the main backend's AI-data endpoint.
#[derive(Clone)]
pub struct BackendClient {
    http_client: Client,
    base_url: String,
}

/// The backend wraps the payload in a `data` envelope.
#[derive(Debug, Deserialize)]
struct AiDataEnvelope {
    #[serde(default)]
    data: AiData,
}

impl BackendClient {
    /// Create a client against an explicit base URL (e.g. `http://host/api`).
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from the `MAIN_BACKEND_URL` environment variable.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("MAIN_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(&base_url)
    }

    /// Fetch the caller's transactions and all-time stats in one call.
    pub async fn fetch_ai_data(&self, token: &str) -> Result<AiData> {
        let response = self
            .http_client
            .get(format!("{}/transactions/ai-data", self.base_url))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "ai-data fetch failed with status {}",
                response.status()
            )));
        }

        let envelope: AiDataEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    /// Base URL (for logging)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
