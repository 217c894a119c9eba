//! Expense forecast handler

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::{bearer_token, AppError, AppState, MAX_FORECAST_PERIODS};
use finsight_core::forecast::{build_forecast, DEFAULT_FORECAST_PERIODS};
use finsight_core::models::Insight;
use finsight_core::AIBackend;

/// Request body for expense predictions
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    /// Forecast horizon in months (default 6, max 24)
    pub forecast_period: Option<u32>,
}

/// POST /api/ai/expense-prediction - Forecast income, expenses, and balance
///
/// Runs the projection engine over the caller's transaction history and
/// decorates the report with model-generated insights. Insight generation
/// failures never fail the request; a static fallback is served instead.
pub async fn expense_prediction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<PredictionRequest>>,
) -> Result<Json<Value>, AppError> {
    let token = bearer_token(&headers)?;

    let periods = body
        .and_then(|Json(b)| b.forecast_period)
        .unwrap_or(DEFAULT_FORECAST_PERIODS);
    if periods == 0 || periods > MAX_FORECAST_PERIODS {
        return Err(AppError::bad_request(&format!(
            "forecastPeriod must be between 1 and {}",
            MAX_FORECAST_PERIODS
        )));
    }

    let data = state
        .backend
        .fetch_ai_data(token)
        .await
        .map_err(AppError::from_core)?;

    let as_of = Utc::now().date_naive();
    let report = build_forecast(&data.transactions, &data.stats, as_of, periods)
        .map_err(AppError::from_core)?;

    let insights = match &state.ai {
        Some(ai) => match ai.expense_insights(&report).await {
            Ok(insights) if !insights.is_empty() => insights,
            Ok(_) => vec![Insight::unavailable()],
            Err(e) => {
                warn!(error = %e, "Insight generation failed, serving fallback");
                vec![Insight::unavailable()]
            }
        },
        None => vec![Insight::unavailable()],
    };

    let mut response = serde_json::to_value(&report)?;
    response["insights"] = json!(insights);

    Ok(Json(response))
}
