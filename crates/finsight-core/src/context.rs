//! Financial context for chat: a personal/general question classifier and
//! the compact profile attached to personal questions.

use std::collections::HashMap;

use crate::forecast::round_cents;
use crate::models::{AiData, CategoryAmount, FinancialContext, TransactionType};

/// Number of top spending categories included in the chat context.
const TOP_CATEGORIES: usize = 5;

/// Phrases that mark a question as being about the user's own finances.
const PERSONAL_INDICATORS: &[&str] = &[
    "my budget",
    "my income",
    "my expense",
    "my spending",
    "my savings",
    "my balance",
    "my transaction",
    "my financial",
    "my money",
    "i have",
    "i earn",
    "i spend",
    "i save",
    "i want to",
    "based on my",
    "according to my",
    "for my",
    "my current",
    "recommendation based on",
    "advice for my",
    "suggest for my",
    "what should i",
    "how much should i",
    "can i afford",
    "should i invest",
    "my investment",
    "my portfolio",
];

/// Phrases that mark a question as being about general financial concepts.
const GENERAL_INDICATORS: &[&str] = &[
    "in general",
    "generally",
    "what is",
    "what are",
    "explain",
    "tell me about",
    "is it better",
    "which is better",
    "compare",
    "difference between",
    "pros and cons",
    "advantages",
    "disadvantages",
    "should one",
    "is investing in",
    "is it good to",
    "is it worth",
    "what do you think about",
    "your opinion on",
];

/// Financial action words used as a tiebreaker.
const ACTION_WORDS: &[&str] = &["invest", "save", "spend", "budget", "plan"];

/// Decide whether a chat message is about the user's own finances.
///
/// Personal questions get the user's financial profile attached to the
/// prompt; general ones are answered without fetching any user data.
/// Explicit personal phrasing wins over general phrasing; with neither,
/// a message mentioning a financial action counts as personal unless it
/// is too short to carry any real context.
pub fn is_personal_finance_question(message: &str) -> bool {
    let lower = message.to_lowercase();

    let has_personal = PERSONAL_INDICATORS.iter().any(|i| lower.contains(i));
    let has_general = GENERAL_INDICATORS.iter().any(|i| lower.contains(i));

    if has_general && !has_personal {
        return false;
    }
    if has_personal {
        return true;
    }

    let has_action = ACTION_WORDS.iter().any(|w| lower.contains(w));
    if message.len() < 20 && has_action {
        return false;
    }
    has_action
}

/// Summarize a user's finances into the compact profile the chat prompt
/// carries: totals, savings rate, and the biggest expense categories.
pub fn assemble_context(data: &AiData) -> FinancialContext {
    let stats = &data.stats;
    let monthly_savings = stats.total_income - stats.total_expense;
    let savings_rate = if stats.total_income > 0.0 {
        monthly_savings / stats.total_income * 100.0
    } else {
        0.0
    };

    let mut by_category: HashMap<&str, f64> = HashMap::new();
    for tx in &data.transactions {
        if tx.kind == TransactionType::Expense {
            *by_category.entry(tx.category.as_str()).or_insert(0.0) += tx.amount;
        }
    }

    let mut top_categories: Vec<CategoryAmount> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryAmount {
            category: category.to_string(),
            amount: round_cents(amount),
        })
        .collect();
    top_categories.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));
    top_categories.truncate(TOP_CATEGORIES);

    FinancialContext {
        total_income: round_cents(stats.total_income),
        total_expense: round_cents(stats.total_expense),
        balance: round_cents(stats.balance),
        monthly_savings: round_cents(monthly_savings),
        savings_rate: round_cents(savings_rate),
        transaction_count: data.transactions.len(),
        top_categories,
    }
}
