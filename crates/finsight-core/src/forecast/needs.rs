//! Next-month essentials forecast.
//!
//! Classifies expenses into needs and wants, builds a six-month needs
//! history, and forecasts next month as the trailing three-month average
//! plus a 5% buffer. Pure computation, no model call.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::aggregate::parse_date;
use super::project::round_cents;
use crate::models::{Transaction, TransactionType};

/// Months of needs history returned for sparklines.
const HISTORY_MONTHS: u32 = 6;

/// Months averaged for the forecast itself.
const FORECAST_WINDOW: usize = 3;

/// Safety margin applied on top of the averaged needs.
const BUFFER_RATE: f64 = 0.05;

/// Categories that always count as needs.
const NEED_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Bills",
    "Healthcare",
    "Education",
    "Rent",
    "Groceries",
];

/// Whether a transaction covers an essential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Necessity {
    Need,
    Want,
}

/// Needs total for one month of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedsMonth {
    /// Short month name ("Jan", "Feb", ...)
    pub month: String,
    pub amount: f64,
}

/// Breakdown of the forecast into its base and buffer parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedsBreakdown {
    pub base: f64,
    pub buffer: f64,
}

/// Forecast of next month's essential spending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedsForecast {
    pub forecasted_amount: f64,
    pub breakdown: NeedsBreakdown,
    pub history: Vec<NeedsMonth>,
    pub confidence: f64,
}

/// Classify a transaction by category, falling back to title keywords.
pub fn classify_necessity(category: &str, title: &str) -> Necessity {
    if NEED_CATEGORIES.contains(&category) {
        return Necessity::Need;
    }
    let lower = title.to_lowercase();
    if lower.contains("rent") || lower.contains("bill") {
        return Necessity::Need;
    }
    Necessity::Want
}

/// A transaction counts as a need when the backend tagged it so, or when
/// the classifier says so.
fn is_need(tx: &Transaction) -> bool {
    tx.necessity.as_deref() == Some("Need")
        || classify_necessity(&tx.category, &tx.title) == Necessity::Need
}

/// Forecast next month's needs from the trailing three-month average of
/// essential spending, with a 5% buffer on top.
///
/// History covers the six calendar months ending at `as_of`, oldest
/// first, one entry per month even when it saw no spending. Unparsable
/// transaction dates are skipped, as in the aggregator.
pub fn forecast_needs(transactions: &[Transaction], as_of: NaiveDate) -> NeedsForecast {
    let history: Vec<NeedsMonth> = (0..HISTORY_MONTHS)
        .rev()
        .map(|back| {
            let month_date = as_of
                .checked_sub_months(Months::new(back))
                .unwrap_or(NaiveDate::MIN);
            let amount: f64 = transactions
                .iter()
                .filter(|tx| tx.kind == TransactionType::Expense && is_need(tx))
                .filter(|tx| {
                    parse_date(&tx.date).is_some_and(|d| {
                        d.year() == month_date.year() && d.month() == month_date.month()
                    })
                })
                .map(|tx| tx.amount)
                .sum();
            NeedsMonth {
                month: month_date.format("%b").to_string(),
                amount: round_cents(amount),
            }
        })
        .collect();

    let window = &history[history.len() - FORECAST_WINDOW..];
    let base = window.iter().map(|m| m.amount).sum::<f64>() / FORECAST_WINDOW as f64;
    let buffer = base * BUFFER_RATE;

    NeedsForecast {
        forecasted_amount: round_cents(base + buffer),
        breakdown: NeedsBreakdown {
            base: round_cents(base),
            buffer: round_cents(buffer),
        },
        history,
        confidence: 0.85,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, category: &str, title: &str, amount: f64) -> Transaction {
        Transaction {
            date: date.to_string(),
            kind: TransactionType::Expense,
            amount,
            category: category.to_string(),
            title: title.to_string(),
            necessity: None,
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_classify_by_category_and_title() {
        assert_eq!(classify_necessity("Food", "Lunch"), Necessity::Need);
        assert_eq!(classify_necessity("Housing", "Monthly rent"), Necessity::Need);
        assert_eq!(classify_necessity("Other", "Electricity bill"), Necessity::Need);
        assert_eq!(classify_necessity("Shopping", "New headphones"), Necessity::Want);
    }

    #[test]
    fn test_backend_tag_overrides_classifier() {
        let mut t = tx("2025-06-01", "Shopping", "Work laptop", 900.0);
        t.necessity = Some("Need".to_string());
        assert!(is_need(&t));
    }

    #[test]
    fn test_forecast_averages_last_three_months_with_buffer() {
        let txs = vec![
            tx("2025-04-05", "Food", "Groceries", 300.0),
            tx("2025-05-05", "Food", "Groceries", 330.0),
            tx("2025-06-05", "Food", "Groceries", 270.0),
            // Wants never count toward needs.
            tx("2025-06-10", "Shopping", "Sneakers", 500.0),
            // Older months show up in history but not in the average.
            tx("2025-02-05", "Food", "Groceries", 1000.0),
        ];

        let forecast = forecast_needs(&txs, as_of());

        assert_eq!(forecast.history.len(), 6);
        assert_eq!(forecast.history[0].month, "Jan");
        assert_eq!(forecast.history[5].month, "Jun");
        assert_eq!(forecast.history[1].amount, 1000.0);

        // (300 + 330 + 270) / 3 = 300, buffer 15.
        assert_eq!(forecast.breakdown.base, 300.0);
        assert_eq!(forecast.breakdown.buffer, 15.0);
        assert_eq!(forecast.forecasted_amount, 315.0);
        assert_eq!(forecast.confidence, 0.85);
    }

    #[test]
    fn test_empty_history_forecasts_zero() {
        let forecast = forecast_needs(&[], as_of());
        assert_eq!(forecast.forecasted_amount, 0.0);
        assert_eq!(forecast.history.len(), 6);
        assert!(forecast.history.iter().all(|m| m.amount == 0.0));
    }

    #[test]
    fn test_unparsable_dates_skipped() {
        let txs = vec![
            tx("soon", "Food", "Groceries", 400.0),
            tx("2025-06-05", "Food", "Groceries", 100.0),
        ];
        let forecast = forecast_needs(&txs, as_of());
        assert_eq!(forecast.history[5].amount, 100.0);
    }
}
