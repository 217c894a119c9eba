//! Wire types shared between the main-backend client, the forecast engine,
//! the AI backends, and the REST API.
//!
//! Field names serialize as camelCase to stay compatible with the JSON API
//! the browser client already speaks.

use serde::{Deserialize, Serialize};

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// A transaction as returned by the main finance backend.
///
/// Owned by the persistence layer behind that backend; this service only
/// reads it. The date stays a raw string here so the aggregator can skip
/// unparsable dates without aborting the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    /// Need/Want tag assigned by the main backend, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub necessity: Option<String>,
}

/// All-time totals maintained by the main backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStats {
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expense: f64,
    #[serde(default)]
    pub balance: f64,
}

/// Unified payload from `GET /transactions/ai-data` on the main backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiData {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub stats: FinancialStats,
}

/// One projected future period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub period: u32,
    pub projected_income: f64,
    pub projected_expense: f64,
    pub projected_balance: f64,
}

/// Measured trends over the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub income_trend: f64,
    pub expense_trend: f64,
    pub savings_rate: f64,
}

/// Full forecast as served by the expense-prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub current_balance: f64,
    pub average_monthly_income: f64,
    pub average_monthly_expense: f64,
    pub projections: Vec<Projection>,
    pub trends: TrendSummary,
}

/// A textual insight generated by the model (or a static fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
}

impl Insight {
    /// Static fallback used whenever generation fails.
    pub fn unavailable() -> Self {
        Self {
            kind: "info".to_string(),
            title: "AI Unavailable".to_string(),
            message: "Could not generate detailed insights at this time.".to_string(),
        }
    }
}

/// An investment recommendation generated by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: String,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_amount: Option<f64>,
}

impl Recommendation {
    /// Static fallback used whenever generation fails.
    pub fn unavailable() -> Self {
        Self {
            kind: "info".to_string(),
            priority: "medium".to_string(),
            title: "AI Unavailable".to_string(),
            message: "Please try again later for investment advice.".to_string(),
            suggested_amount: None,
        }
    }
}

/// Category suggestion for a single transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub category: String,
    pub confidence: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl CategorySuggestion {
    /// Static fallback used whenever generation fails.
    pub fn fallback() -> Self {
        Self {
            category: "Other".to_string(),
            confidence: 0.0,
            suggestions: vec!["Other".to_string()],
        }
    }
}

/// One turn in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Assistant reply for the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ChatReply {
    /// Static fallback used whenever generation fails.
    pub fn fallback() -> Self {
        Self {
            response: "I understand your question. Let me help you with that.".to_string(),
            suggestions: vec![],
        }
    }
}

/// Spending total for one category, used in chat context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
}

/// Financial context assembled for personal chat questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialContext {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub monthly_savings: f64,
    pub savings_rate: f64,
    pub transaction_count: usize,
    pub top_categories: Vec<CategoryAmount>,
}

/// Emergency fund adequacy relative to six months of expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyFundStatus {
    Adequate,
    Insufficient,
}

/// Savings capacity snapshot for the investment-advice endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealth {
    pub monthly_savings: f64,
    pub savings_rate: f64,
    pub emergency_fund_status: EmergencyFundStatus,
}

/// Systematic-investment-plan projection (compound interest amortization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipProjection {
    pub invested_amount: f64,
    pub maturity_amount: f64,
    pub returns: f64,
    pub return_percentage: f64,
    pub cagr: f64,
}
