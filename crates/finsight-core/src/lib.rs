//! Finsight Core Library
//!
//! Shared functionality for the Finsight forecasting service:
//! - Monthly transaction aggregation and OLS trend estimation
//! - Damped balance projections over a configurable horizon
//! - SIP maturity math and financial health assessment
//! - Pluggable AI backends (OpenAI-compatible APIs, mock)
//! - Prompt builders and JSON repair for model output
//! - HTTP client for the main finance backend's AI payload

pub mod ai;
pub mod backend;
pub mod context;
pub mod error;
pub mod forecast;
pub mod invest;
pub mod models;

/// Test utilities including a mock main-backend server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIBackend, AIClient, MockBackend, OpenAICompatibleBackend};
pub use backend::BackendClient;
pub use context::{assemble_context, is_personal_finance_question};
pub use error::{Error, Result};
pub use forecast::{
    aggregate_monthly, build_forecast, classify_necessity, forecast_needs, generate, ols_slope,
    round_cents, MonthlyBucket, Necessity, NeedsForecast, ProjectionInputs,
    DEFAULT_FORECAST_PERIODS, DEFAULT_LOOKBACK_MONTHS,
};
pub use invest::{financial_health, sip_projection};
pub use models::{
    AiData, CategoryAmount, CategorySuggestion, ChatMessage, ChatReply, EmergencyFundStatus,
    FinancialContext, FinancialHealth, FinancialStats, ForecastReport, Insight, Projection,
    Recommendation, SipProjection, Transaction, TransactionType, TrendSummary,
};
