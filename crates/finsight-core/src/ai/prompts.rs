//! Prompt builders for the hosted model.
//!
//! Each builder returns a (system, user) pair. Prompts demand JSON-only
//! output; the repair parser deals with models that don't comply.

use crate::models::{ChatMessage, FinancialContext, FinancialHealth, ForecastReport};

fn arrow(trend: f64) -> &'static str {
    if trend > 0.0 {
        "up"
    } else if trend < 0.0 {
        "down"
    } else {
        "flat"
    }
}

/// Prompt for the expense-prediction insights.
pub fn expense_insights(report: &ForecastReport) -> (String, String) {
    let system = "Financial advisor. Provide 4-6 actionable insights. \
        Return ONLY valid JSON. No explanations, just JSON."
        .to_string();

    let user = format!(
        "Financial data: Balance {:.2}, Income {:.2}/mo, Expense {:.2}/mo, \
         Savings rate {:.1}%, Income trend {}, Expense trend {}\n\n\
         Provide 4-6 actionable insights. Return ONLY valid JSON:\n\
         {{\"insights\": [{{\"type\": \"warning|success|info\", \
         \"title\": \"Short actionable title\", \
         \"message\": \"Specific actionable message with amounts\"}}]}}\n\
         Focus on savings optimization, expense reduction, income growth, \
         and financial planning.",
        report.current_balance,
        report.average_monthly_income,
        report.average_monthly_expense,
        report.trends.savings_rate,
        arrow(report.trends.income_trend),
        arrow(report.trends.expense_trend),
    );

    (system, user)
}

/// Prompt for investment recommendations.
pub fn investment_recommendations(health: &FinancialHealth, balance: f64) -> (String, String) {
    let system = "Investment advisor. Provide 4-6 specific recommendations \
        with amounts. Return ONLY valid JSON. No explanations, just JSON."
        .to_string();

    let user = format!(
        "Investment analysis: Savings {:.2}/mo, Balance {:.2}, \
         Emergency fund {:?}, Savings rate {:.1}%\n\n\
         Provide 4-6 specific investment recommendations. Return ONLY valid JSON:\n\
         {{\"recommendations\": [{{\"type\": \"sip|emergency|portfolio\", \
         \"priority\": \"high|medium|low\", \"title\": \"...\", \
         \"message\": \"...\", \"suggestedAmount\": 0}}]}}\n\
         Use numeric values only. Base amounts on savings capacity.",
        health.monthly_savings, balance, health.emergency_fund_status, health.savings_rate,
    );

    (system, user)
}

/// Prompt for transaction categorization.
pub fn categorize_transaction(title: &str, amount: f64, description: Option<&str>) -> (String, String) {
    let system = "Transaction categorizer. Return ONLY valid JSON. \
        No explanations, just JSON."
        .to_string();

    let user = format!(
        "Categorize transaction: Title \"{}\", Amount {:.2}, Description \"{}\"\n\n\
         Categories: Food, Transport, Shopping, Bills, Entertainment, \
         Healthcare, Education, Travel, Other\n\n\
         Return ONLY valid JSON:\n\
         {{\"category\": \"Transport\", \"confidence\": 0.9, \
         \"suggestions\": [\"Transport\", \"Other\"]}}",
        title,
        amount,
        description.unwrap_or("N/A"),
    );

    (system, user)
}

/// Prompt for the financial assistant chat.
///
/// With a context the assistant answers from the user's own numbers;
/// without one it gives general advice and avoids specific amounts.
pub fn chat(
    message: &str,
    history: &[ChatMessage],
    context: Option<&FinancialContext>,
) -> (String, String) {
    let system = match context {
        Some(_) => {
            "Financial advisor. Return ONLY valid JSON: \
             {\"response\": \"answer\", \"suggestions\": []}. \
             No explanations, just JSON."
        }
        None => {
            "Financial advisor. Return ONLY valid JSON: \
             {\"response\": \"answer\", \"suggestions\": []}. \
             No explanations, just JSON. No specific amounts."
        }
    }
    .to_string();

    let context_summary = context
        .map(|ctx| {
            let categories = ctx
                .top_categories
                .iter()
                .take(3)
                .map(|c| format!("{}: {:.2}", c.category, c.amount))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Financial profile: Income {:.2}/mo, Expenses {:.2}/mo, \
                 Savings {:.2}/mo, Rate {:.1}%, Balance {:.2}, Transactions {}\n\
                 Top categories: {}\n",
                ctx.total_income,
                ctx.total_expense,
                ctx.monthly_savings,
                ctx.savings_rate,
                ctx.balance,
                ctx.transaction_count,
                categories,
            )
        })
        .unwrap_or_default();

    // Only the last few turns matter; keep the prompt small.
    let conversation = history
        .iter()
        .rev()
        .take(5)
        .rev()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");

    let instructions = match context {
        Some(_) => {
            "Personal finance question. Provide specific amounts based on \
             the profile above."
        }
        None => "General finance question. Provide general advice, pros/cons, comparisons.",
    };

    let user = format!(
        "{}{}Question: {}\n\n{}\n\nReturn ONLY valid JSON: \
         {{\"response\": \"Your detailed answer here\", \
         \"suggestions\": [\"suggestion1\", \"suggestion2\"]}}",
        context_summary,
        if conversation.is_empty() {
            String::new()
        } else {
            format!("Previous:\n{}\n\n", conversation)
        },
        message,
        instructions,
    );

    (system, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendSummary;

    #[test]
    fn test_expense_insights_prompt_mentions_trends() {
        let report = ForecastReport {
            current_balance: 1000.0,
            average_monthly_income: 5000.0,
            average_monthly_expense: 3000.0,
            projections: vec![],
            trends: TrendSummary {
                income_trend: 120.0,
                expense_trend: -30.0,
                savings_rate: 40.0,
            },
        };
        let (_, user) = expense_insights(&report);
        assert!(user.contains("Income trend up"));
        assert!(user.contains("Expense trend down"));
        assert!(user.contains("5000.00/mo"));
    }

    #[test]
    fn test_chat_prompt_without_context_forbids_amounts() {
        let (system, user) = chat("Should I invest in gold?", &[], None);
        assert!(system.contains("No specific amounts"));
        assert!(user.contains("General finance question"));
    }

    #[test]
    fn test_chat_prompt_keeps_last_five_turns() {
        let history: Vec<ChatMessage> = (0..8)
            .map(|i| ChatMessage {
                role: "user".to_string(),
                content: format!("turn {}", i),
            })
            .collect();
        let (_, user) = chat("next", &history, None);
        assert!(!user.contains("turn 2"));
        assert!(user.contains("turn 3"));
        assert!(user.contains("turn 7"));
    }
}
