//! Forward projection of income, expense, and running balance.

use crate::error::{Error, Result};
use crate::models::Projection;

/// Inputs to the projection walk. All values must be finite.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionInputs {
    pub current_balance: f64,
    pub average_income: f64,
    pub average_expense: f64,
    pub income_trend: f64,
    pub expense_trend: f64,
}

/// How much of the raw measured trend is allowed to influence a projection
/// at the end of the horizon. The trend's weight ramps up linearly with
/// (i / N), so early periods stay close to the plain average.
const TREND_DAMPING: f64 = 0.3;

/// Round to 2 fractional digits, half away from zero on the cent boundary.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Walk forward `periods` months from the current balance, applying the
/// monthly averages adjusted by the damped trend factor.
///
/// A zero average disables the corresponding trend adjustment entirely
/// (factor 1) so the division can never produce NaN or infinity. Non-finite
/// inputs fail fast with [`Error::InvalidInput`].
pub fn generate(inputs: &ProjectionInputs, periods: u32) -> Result<Vec<Projection>> {
    validate_finite(inputs)?;

    let n = periods as f64;
    let mut projections = Vec::with_capacity(periods as usize);
    let mut running_balance = inputs.current_balance;

    for i in 1..=periods {
        let ramp = i as f64 / n;

        let income_factor = if inputs.average_income > 0.0 {
            1.0 + (inputs.income_trend / inputs.average_income) * ramp * TREND_DAMPING
        } else {
            1.0
        };
        let expense_factor = if inputs.average_expense > 0.0 {
            1.0 + (inputs.expense_trend / inputs.average_expense) * ramp * TREND_DAMPING
        } else {
            1.0
        };

        let projected_income = inputs.average_income * income_factor;
        let projected_expense = inputs.average_expense * expense_factor;

        running_balance += projected_income - projected_expense;

        projections.push(Projection {
            period: i,
            projected_income: round_cents(projected_income),
            projected_expense: round_cents(projected_expense),
            projected_balance: round_cents(running_balance),
        });
    }

    Ok(projections)
}

fn validate_finite(inputs: &ProjectionInputs) -> Result<()> {
    let fields = [
        ("currentBalance", inputs.current_balance),
        ("averageMonthlyIncome", inputs.average_income),
        ("averageMonthlyExpense", inputs.average_expense),
        ("incomeTrend", inputs.income_trend),
        ("expenseTrend", inputs.expense_trend),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(Error::InvalidInput(format!(
                "{} must be a finite number, got {}",
                name, value
            )));
        }
    }
    Ok(())
}
