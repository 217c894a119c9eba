//! Ordinary-least-squares trend estimation over a monthly series.

/// OLS slope of `values` against the 1-based index 1..=n.
///
/// Uses the closed forms Σi = n(n+1)/2 and Σi² = n(n+1)(2n+1)/6. Fewer than
/// two data points means no measurable trend, so the slope is 0 — an
/// expected policy branch, not an error.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let sum_x = n_f * (n_f + 1.0) / 2.0;
    let sum_x2 = n_f * (n_f + 1.0) * (2.0 * n_f + 1.0) / 6.0;
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values
        .iter()
        .enumerate()
        .map(|(idx, v)| (idx as f64 + 1.0) * v)
        .sum();

    (n_f * sum_xy - sum_x * sum_y) / (n_f * sum_x2 - sum_x * sum_x)
}
