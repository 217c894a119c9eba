//! Forecast projection engine
//!
//! Turns a flat list of transactions into a multi-month balance forecast:
//!
//! 1. [`aggregate`] groups transactions into per-calendar-month
//!    income/expense buckets over a trailing lookback window.
//! 2. [`trend`] fits an ordinary-least-squares slope over each monthly
//!    series.
//! 3. [`project`] walks forward N periods from the current balance,
//!    applying the monthly averages adjusted by a damped trend factor.
//!
//! [`needs`] is a sibling forecaster for essential spending only: a
//! trailing three-month average of need-classified expenses plus a buffer.
//!
//! The engine is pure arithmetic over its inputs: no I/O, no shared state,
//! no wall-clock access. All derived data lives only for the duration of
//! one computation.

pub mod aggregate;
pub mod needs;
pub mod project;
pub mod trend;

pub use aggregate::{aggregate_monthly, MonthlyBucket};
pub use needs::{classify_necessity, forecast_needs, Necessity, NeedsForecast};
pub use project::{generate, round_cents, ProjectionInputs};
pub use trend::ols_slope;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{FinancialStats, ForecastReport, Transaction, TrendSummary};

/// Trailing window of transactions considered for averages and trends.
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 6;

/// Default number of future months to project.
pub const DEFAULT_FORECAST_PERIODS: u32 = 6;

/// Build a full forecast report from a user's transaction history and
/// all-time stats.
///
/// When the lookback window contains no monthly data points the averages
/// fall back to the all-time totals spread evenly over the window, rather
/// than erroring out.
pub fn build_forecast(
    transactions: &[Transaction],
    stats: &FinancialStats,
    as_of: NaiveDate,
    periods: u32,
) -> Result<ForecastReport> {
    let buckets = aggregate_monthly(transactions, as_of, DEFAULT_LOOKBACK_MONTHS);

    let incomes: Vec<f64> = buckets.iter().map(|b| b.income).collect();
    let expenses: Vec<f64> = buckets.iter().map(|b| b.expense).collect();

    let average_income = mean_or_fallback(&incomes, stats.total_income);
    let average_expense = mean_or_fallback(&expenses, stats.total_expense);

    let income_trend = ols_slope(&incomes);
    let expense_trend = ols_slope(&expenses);

    let savings_rate = if average_income > 0.0 {
        (average_income - average_expense) / average_income * 100.0
    } else {
        0.0
    };

    let projections = generate(
        &ProjectionInputs {
            current_balance: stats.balance,
            average_income,
            average_expense,
            income_trend,
            expense_trend,
        },
        periods,
    )?;

    Ok(ForecastReport {
        current_balance: round_cents(stats.balance),
        average_monthly_income: round_cents(average_income),
        average_monthly_expense: round_cents(average_expense),
        projections,
        trends: TrendSummary {
            income_trend: round_cents(income_trend),
            expense_trend: round_cents(expense_trend),
            savings_rate: round_cents(savings_rate),
        },
    })
}

fn mean_or_fallback(values: &[f64], all_time_total: f64) -> f64 {
    if values.is_empty() {
        all_time_total / DEFAULT_LOOKBACK_MONTHS as f64
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn tx(date: &str, kind: TransactionType, amount: f64) -> Transaction {
        Transaction {
            date: date.to_string(),
            kind,
            amount,
            category: String::new(),
            title: String::new(),
            necessity: None,
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_forecast_from_history() {
        // Three months of rising income against flat expenses.
        let txs = vec![
            tx("2025-03-05", TransactionType::Income, 1000.0),
            tx("2025-04-05", TransactionType::Income, 2000.0),
            tx("2025-05-05", TransactionType::Income, 3000.0),
            tx("2025-03-20", TransactionType::Expense, 500.0),
            tx("2025-04-20", TransactionType::Expense, 500.0),
            tx("2025-05-20", TransactionType::Expense, 500.0),
        ];
        let stats = FinancialStats {
            total_income: 6000.0,
            total_expense: 1500.0,
            balance: 4500.0,
        };

        let report = build_forecast(&txs, &stats, as_of(), 3).unwrap();

        assert_eq!(report.current_balance, 4500.0);
        assert_eq!(report.average_monthly_income, 2000.0);
        assert_eq!(report.average_monthly_expense, 500.0);
        assert_eq!(report.trends.income_trend, 1000.0);
        assert_eq!(report.trends.expense_trend, 0.0);
        assert_eq!(report.trends.savings_rate, 75.0);
        assert_eq!(report.projections.len(), 3);
        // With a positive income trend each projected income exceeds the
        // plain average and grows across the horizon.
        assert!(report.projections[0].projected_income > 2000.0);
        assert!(
            report.projections[2].projected_income > report.projections[0].projected_income
        );
    }

    #[test]
    fn test_empty_history_falls_back_to_stats() {
        let stats = FinancialStats {
            total_income: 12000.0,
            total_expense: 6000.0,
            balance: 6000.0,
        };

        let report = build_forecast(&[], &stats, as_of(), 6).unwrap();

        // All-time totals spread over the lookback window.
        assert_eq!(report.average_monthly_income, 2000.0);
        assert_eq!(report.average_monthly_expense, 1000.0);
        assert_eq!(report.trends.income_trend, 0.0);
        assert_eq!(report.projections.len(), 6);
        assert_eq!(report.projections[0].projected_income, 2000.0);
    }

    #[test]
    fn test_no_data_at_all_produces_flat_zero_forecast() {
        let report =
            build_forecast(&[], &FinancialStats::default(), as_of(), 6).unwrap();
        for proj in &report.projections {
            assert_eq!(proj.projected_income, 0.0);
            assert_eq!(proj.projected_expense, 0.0);
            assert_eq!(proj.projected_balance, 0.0);
        }
        assert_eq!(report.trends.savings_rate, 0.0);
    }

    #[test]
    fn test_single_month_has_no_trend() {
        let txs = vec![
            tx("2025-06-01", TransactionType::Income, 4000.0),
            tx("2025-06-02", TransactionType::Expense, 1000.0),
        ];
        let stats = FinancialStats {
            total_income: 4000.0,
            total_expense: 1000.0,
            balance: 3000.0,
        };

        let report = build_forecast(&txs, &stats, as_of(), 4).unwrap();
        assert_eq!(report.trends.income_trend, 0.0);
        assert_eq!(report.trends.expense_trend, 0.0);
        // No trend: every period repeats the averages exactly.
        for proj in &report.projections {
            assert_eq!(proj.projected_income, 4000.0);
            assert_eq!(proj.projected_expense, 1000.0);
        }
    }
}
