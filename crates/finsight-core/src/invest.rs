//! Investment arithmetic: SIP amortization and financial-health snapshots.

use crate::forecast::round_cents;
use crate::models::{EmergencyFundStatus, FinancialHealth, FinancialStats, SipProjection};

/// Emergency fund target, in months of expenses.
const EMERGENCY_FUND_MONTHS: f64 = 6.0;

/// Project a systematic investment plan (fixed monthly contribution,
/// compounded monthly).
///
/// `expected_return` is an annual percentage (e.g. 12.0 for 12% p.a.).
/// Returns `None` when any input is non-positive or non-finite — the
/// projection is simply omitted from the response in that case.
pub fn sip_projection(
    monthly_amount: f64,
    duration_years: u32,
    expected_return: f64,
) -> Option<SipProjection> {
    if !(monthly_amount.is_finite() && expected_return.is_finite()) {
        return None;
    }
    if monthly_amount <= 0.0 || duration_years == 0 || expected_return <= 0.0 {
        return None;
    }

    let monthly_rate = expected_return / 12.0 / 100.0;
    let months = (duration_years * 12) as f64;
    let invested_amount = monthly_amount * months;

    let compound_factor = (1.0 + monthly_rate).powf(months);
    let maturity_amount =
        monthly_amount * ((compound_factor - 1.0) / monthly_rate) * (1.0 + monthly_rate);
    let returns = maturity_amount - invested_amount;
    let cagr = ((maturity_amount / invested_amount).powf(12.0 / months) - 1.0) * 100.0;

    Some(SipProjection {
        invested_amount: round_cents(invested_amount),
        maturity_amount: round_cents(maturity_amount),
        returns: round_cents(returns),
        return_percentage: round_cents(returns / invested_amount * 100.0),
        cagr: round_cents(cagr),
    })
}

/// Savings capacity snapshot derived from all-time stats.
///
/// The emergency fund counts as adequate once the balance covers six
/// months of expenses.
pub fn financial_health(stats: &FinancialStats) -> FinancialHealth {
    let monthly_savings = stats.total_income - stats.total_expense;
    let savings_rate = if stats.total_income > 0.0 {
        monthly_savings / stats.total_income * 100.0
    } else {
        0.0
    };
    let target = stats.total_expense * EMERGENCY_FUND_MONTHS;
    let emergency_fund_status = if stats.balance >= target {
        EmergencyFundStatus::Adequate
    } else {
        EmergencyFundStatus::Insufficient
    };

    FinancialHealth {
        monthly_savings: round_cents(monthly_savings),
        savings_rate: round_cents(savings_rate),
        emergency_fund_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sip_projection_grows_investment() {
        let sip = sip_projection(5000.0, 10, 12.0).unwrap();
        assert_eq!(sip.invested_amount, 600_000.0);
        assert!(sip.maturity_amount > sip.invested_amount);
        assert!((sip.returns - (sip.maturity_amount - sip.invested_amount)).abs() < 0.02);
        // CAGR is taken over the total contributions, so it lands well
        // below the nominal 12% rate (later contributions compound less).
        assert!(sip.cagr > 6.0 && sip.cagr < 8.0);
    }

    #[test]
    fn test_sip_projection_rejects_degenerate_inputs() {
        assert!(sip_projection(0.0, 10, 12.0).is_none());
        assert!(sip_projection(5000.0, 0, 12.0).is_none());
        assert!(sip_projection(5000.0, 10, 0.0).is_none());
        assert!(sip_projection(5000.0, 10, -3.0).is_none());
        assert!(sip_projection(f64::NAN, 10, 12.0).is_none());
    }

    #[test]
    fn test_financial_health_adequate_fund() {
        let stats = FinancialStats {
            total_income: 8000.0,
            total_expense: 3000.0,
            balance: 20000.0,
        };
        let health = financial_health(&stats);
        assert_eq!(health.monthly_savings, 5000.0);
        assert_eq!(health.savings_rate, 62.5);
        assert_eq!(health.emergency_fund_status, EmergencyFundStatus::Adequate);
    }

    #[test]
    fn test_financial_health_insufficient_fund() {
        let stats = FinancialStats {
            total_income: 8000.0,
            total_expense: 3000.0,
            balance: 10000.0,
        };
        let health = financial_health(&stats);
        assert_eq!(
            health.emergency_fund_status,
            EmergencyFundStatus::Insufficient
        );
    }

    #[test]
    fn test_financial_health_zero_income() {
        let health = financial_health(&FinancialStats::default());
        assert_eq!(health.savings_rate, 0.0);
        // Zero expenses means the (zero) balance already covers the target.
        assert_eq!(health.emergency_fund_status, EmergencyFundStatus::Adequate);
    }
}
