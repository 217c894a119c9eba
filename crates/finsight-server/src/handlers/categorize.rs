//! Transaction categorization handler

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use tracing::warn;

use crate::{bearer_token, AppError, AppState};
use finsight_core::models::CategorySuggestion;
use finsight_core::AIBackend;

/// Request body for categorization
#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    pub title: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/ai/categorize - Suggest a category for a transaction
pub async fn categorize(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CategorizeRequest>,
) -> Result<Json<CategorySuggestion>, AppError> {
    bearer_token(&headers)?;

    if request.title.trim().is_empty() {
        return Err(AppError::bad_request("title is required"));
    }
    if !request.amount.is_finite() {
        return Err(AppError::bad_request("amount must be a finite number"));
    }

    let suggestion = match &state.ai {
        Some(ai) => match ai
            .categorize_transaction(
                request.title.trim(),
                request.amount,
                request.description.as_deref(),
            )
            .await
        {
            Ok(suggestion) => suggestion,
            Err(e) => {
                warn!(error = %e, "Categorization failed, serving fallback");
                CategorySuggestion::fallback()
            }
        },
        None => CategorySuggestion::fallback(),
    };

    Ok(Json(suggestion))
}
