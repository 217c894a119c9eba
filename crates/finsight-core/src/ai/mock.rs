//! Mock backend for testing
//!
//! Provides deterministic responses for all AI operations. Useful for unit
//! tests and development without an API key.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    CategorySuggestion, ChatMessage, ChatReply, EmergencyFundStatus, FinancialContext,
    FinancialHealth, ForecastReport, Insight, Recommendation,
};

use super::AIBackend;

/// Mock AI backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn expense_insights(&self, report: &ForecastReport) -> Result<Vec<Insight>> {
        let mut insights = vec![];

        if report.trends.savings_rate < 20.0 {
            insights.push(Insight {
                kind: "warning".to_string(),
                title: "Low Savings Rate".to_string(),
                message: format!(
                    "Your savings rate is {:.1}%. Aim for at least 20%.",
                    report.trends.savings_rate
                ),
            });
        } else {
            insights.push(Insight {
                kind: "success".to_string(),
                title: "Healthy Savings Rate".to_string(),
                message: format!(
                    "Your savings rate of {:.1}% is on track.",
                    report.trends.savings_rate
                ),
            });
        }

        if report.trends.expense_trend > 0.0 {
            insights.push(Insight {
                kind: "warning".to_string(),
                title: "Rising Expenses".to_string(),
                message: "Monthly expenses are trending upward. Review recent spending."
                    .to_string(),
            });
        }

        Ok(insights)
    }

    async fn investment_recommendations(
        &self,
        health: &FinancialHealth,
        _balance: f64,
    ) -> Result<Vec<Recommendation>> {
        let mut recommendations = vec![Recommendation {
            kind: "sip".to_string(),
            priority: "high".to_string(),
            title: "Start a Monthly SIP".to_string(),
            message: "Invest a fixed amount monthly in diversified index funds.".to_string(),
            suggested_amount: Some((health.monthly_savings * 0.3).max(0.0)),
        }];

        if health.emergency_fund_status == EmergencyFundStatus::Insufficient {
            recommendations.push(Recommendation {
                kind: "emergency".to_string(),
                priority: "high".to_string(),
                title: "Build Emergency Fund".to_string(),
                message: "Keep six months of expenses in liquid savings first.".to_string(),
                suggested_amount: None,
            });
        }

        Ok(recommendations)
    }

    async fn categorize_transaction(
        &self,
        title: &str,
        _amount: f64,
        _description: Option<&str>,
    ) -> Result<CategorySuggestion> {
        // Simple mock: keyword match against well-known merchants
        let category = match title.to_uppercase().as_str() {
            t if t.contains("UBER") || t.contains("FUEL") || t.contains("METRO") => "Transport",
            t if t.contains("NETFLIX") || t.contains("SPOTIFY") || t.contains("CINEMA") => {
                "Entertainment"
            }
            t if t.contains("GROCER") || t.contains("RESTAURANT") || t.contains("COFFEE") => {
                "Food"
            }
            t if t.contains("RENT") || t.contains("ELECTRIC") || t.contains("INTERNET") => {
                "Bills"
            }
            t if t.contains("AMAZON") || t.contains("MALL") => "Shopping",
            _ => "Other",
        };

        Ok(CategorySuggestion {
            category: category.to_string(),
            confidence: if category == "Other" { 0.4 } else { 0.9 },
            suggestions: vec![category.to_string(), "Other".to_string()],
        })
    }

    async fn chat(
        &self,
        message: &str,
        _history: &[ChatMessage],
        context: Option<&FinancialContext>,
    ) -> Result<ChatReply> {
        let response = match context {
            Some(ctx) => format!(
                "With a balance of {:.2} and savings of {:.2}/mo: {}",
                ctx.balance, ctx.monthly_savings, message
            ),
            None => format!("General advice on: {}", message),
        };

        Ok(ChatReply {
            response,
            suggestions: vec!["Track your expenses weekly".to_string()],
        })
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendSummary;

    fn report(savings_rate: f64) -> ForecastReport {
        ForecastReport {
            current_balance: 1000.0,
            average_monthly_income: 5000.0,
            average_monthly_expense: 3000.0,
            projections: vec![],
            trends: TrendSummary {
                income_trend: 0.0,
                expense_trend: 50.0,
                savings_rate,
            },
        }
    }

    #[tokio::test]
    async fn test_low_savings_rate_warns() {
        let backend = MockBackend::new();
        let insights = backend.expense_insights(&report(10.0)).await.unwrap();
        assert!(insights.iter().any(|i| i.kind == "warning"));
    }

    #[tokio::test]
    async fn test_insufficient_fund_adds_recommendation() {
        let backend = MockBackend::new();
        let health = FinancialHealth {
            monthly_savings: 2000.0,
            savings_rate: 25.0,
            emergency_fund_status: EmergencyFundStatus::Insufficient,
        };
        let recs = backend
            .investment_recommendations(&health, 500.0)
            .await
            .unwrap();
        assert!(recs.iter().any(|r| r.kind == "emergency"));
    }
}
