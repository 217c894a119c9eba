//! Essential-spending forecast handler

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;

use crate::{bearer_token, AppError, AppState};
use finsight_core::forecast::needs;
use finsight_core::forecast::NeedsForecast;

/// POST /api/ai/forecast-needs - Forecast next month's essential spending
///
/// Pure computation over the caller's transaction history; no model call.
pub async fn forecast_needs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<NeedsForecast>, AppError> {
    let token = bearer_token(&headers)?;

    let data = state
        .backend
        .fetch_ai_data(token)
        .await
        .map_err(AppError::from_core)?;

    let as_of = Utc::now().date_naive();
    Ok(Json(needs::forecast_needs(&data.transactions, as_of)))
}
