//! Investment advice and SIP projection handler

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{bearer_token, AppError, AppState};
use finsight_core::invest::{financial_health, sip_projection};
use finsight_core::models::{FinancialHealth, Recommendation, SipProjection};
use finsight_core::AIBackend;

/// Request body for investment advice
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequest {
    /// Monthly SIP contribution
    pub sip_amount: Option<f64>,
    /// Investment duration in years
    pub sip_duration: Option<u32>,
    /// Expected annual return percentage
    pub expected_return: Option<f64>,
}

/// Response for investment advice
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentResponse {
    pub financial_health: FinancialHealth,
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_projection: Option<SipProjection>,
}

/// POST /api/ai/investment-advice - Savings assessment and recommendations
///
/// The SIP projection is included only when all three plan parameters are
/// present and valid; an absent or degenerate plan just omits the field.
pub async fn investment_advice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<InvestmentRequest>>,
) -> Result<Json<InvestmentResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let request = body.map(|Json(b)| b).unwrap_or_default();

    let data = state
        .backend
        .fetch_ai_data(token)
        .await
        .map_err(AppError::from_core)?;

    let health = financial_health(&data.stats);

    let recommendations = match &state.ai {
        Some(ai) => match ai
            .investment_recommendations(&health, data.stats.balance)
            .await
        {
            Ok(recs) if !recs.is_empty() => recs,
            Ok(_) => vec![Recommendation::unavailable()],
            Err(e) => {
                warn!(error = %e, "Recommendation generation failed, serving fallback");
                vec![Recommendation::unavailable()]
            }
        },
        None => vec![Recommendation::unavailable()],
    };

    let sip = match (
        request.sip_amount,
        request.sip_duration,
        request.expected_return,
    ) {
        (Some(amount), Some(years), Some(rate)) => sip_projection(amount, years, rate),
        _ => None,
    };

    Ok(Json(InvestmentResponse {
        financial_health: health,
        recommendations,
        sip_projection: sip,
    }))
}
