//! Finsight Web Server
//!
//! Axum-based REST API exposing expense forecasting and AI advisory
//! endpoints on top of the main finance backend.
//!
//! Security features:
//! - Bearer-token passthrough to the main backend (no local credential store)
//! - Restrictive CORS policy
//! - Input validation (forecast horizon bounds, message length limits)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use finsight_core::{AIBackend, AIClient, BackendClient, Error as CoreError};

mod handlers;

/// Maximum forecast horizon accepted from clients, in months
pub const MAX_FORECAST_PERIODS: u32 = 24;

/// Maximum chat message length, in bytes
pub const MAX_CHAT_MESSAGE_LEN: usize = 4000;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only in production)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// AI client, None when no backend is configured (fallbacks served instead)
    pub ai: Option<AIClient>,
    /// Client for the main backend's AI-data endpoint
    pub backend: BackendClient,
}

/// Extract the bearer token that the main backend expects for the caller.
///
/// The token is opaque here; it is forwarded verbatim and validated by the
/// main backend when the AI payload is fetched.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing or invalid Authorization header"))
}

/// Build the application router
pub fn create_router(backend: BackendClient, ai: Option<AIClient>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { ai, backend });
    create_router_with_state(state, config)
}

/// Build the application router over pre-built state (used by tests)
pub fn create_router_with_state(state: Arc<AppState>, config: ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/ai/expense-prediction",
            post(handlers::expense_prediction),
        )
        .route("/ai/investment-advice", post(handlers::investment_advice))
        .route("/ai/forecast-needs", post(handlers::forecast_needs))
        .route("/ai/categorize", post(handlers::categorize))
        .route("/ai/chat", post(handlers::chat));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(
    host: &str,
    port: u16,
    backend: BackendClient,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let ai = check_ai_connection().await;

    info!("Main backend at {}", backend.base_url());

    let app = create_router(backend, ai, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection() -> Option<AIClient> {
    match AIClient::from_env() {
        Some(client) => {
            if client.health_check().await {
                info!(
                    "✅ AI backend connected: {} (model: {})",
                    client.host(),
                    client.model()
                );
            } else {
                warn!(
                    "⚠️  AI backend configured but not responding: {} (model: {})",
                    client.host(),
                    client.model()
                );
            }
            Some(client)
        }
        None => {
            info!("ℹ️  AI backend not configured (set AI_API_KEY to enable model output)");
            None
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn bad_gateway(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error onto an HTTP status, keeping the original for logs.
    ///
    /// Invalid input is the caller's fault; upstream and model failures are
    /// gateway problems; everything else stays a generic 500.
    pub fn from_core(err: CoreError) -> Self {
        let (status, message) = match &err {
            CoreError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CoreError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "Failed to fetch financial data".to_string(),
            ),
            CoreError::Http(_) | CoreError::ModelApi(_) => (
                StatusCode::BAD_GATEWAY,
                "AI service unavailable".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        };
        Self {
            status,
            message,
            internal: Some(err.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
