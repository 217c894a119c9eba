//! Transaction aggregation into per-calendar-month income/expense buckets.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, NaiveDate};
use tracing::debug;

use crate::models::{Transaction, TransactionType};

/// Accumulated income and expense for one calendar month.
///
/// Derived and ephemeral: created fresh per forecast computation. The
/// BTreeMap keying makes the output deterministic regardless of input order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
}

/// Group transactions into monthly buckets over a trailing lookback window.
///
/// The window is anchored to the explicit `as_of` date rather than the wall
/// clock, so the function is pure and testable without mocking time.
///
/// Transactions with unparsable dates are skipped without aborting the
/// batch; transactions older than the window are excluded. Returns one
/// bucket per distinct month that has at least one qualifying transaction,
/// sorted ascending by (year, month). Empty input yields an empty list.
pub fn aggregate_monthly(
    transactions: &[Transaction],
    as_of: NaiveDate,
    lookback_months: u32,
) -> Vec<MonthlyBucket> {
    let cutoff = as_of
        .checked_sub_months(Months::new(lookback_months))
        .unwrap_or(NaiveDate::MIN);

    let mut buckets: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        let date = match parse_date(&tx.date) {
            Some(d) => d,
            None => {
                debug!(date = %tx.date, "Skipping transaction with unparsable date");
                continue;
            }
        };

        if date < cutoff {
            continue;
        }

        let entry = buckets.entry((date.year(), date.month())).or_insert((0.0, 0.0));
        match tx.kind {
            TransactionType::Income => entry.0 += tx.amount,
            TransactionType::Expense => entry.1 += tx.amount,
        }
    }

    buckets
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyBucket {
            year,
            month,
            income,
            expense,
        })
        .collect()
}

/// Parse a transaction date, accepting plain dates and RFC 3339 timestamps.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
