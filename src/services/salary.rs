//! Salary estimation from a (from, to) pair of optional bounds
//!
//! Source-agnostic: each source unwraps its own vacancy shape and checks
//! the currency before calling [`predict_salary`].

/// Multiplier applied when only the lower bound is known
pub const OPEN_TOP_FACTOR: f64 = 1.2;

/// Multiplier applied when only the upper bound is known
pub const OPEN_BOTTOM_FACTOR: f64 = 0.8;

/// Estimate a salary from optional bounds.
///
/// A bound counts as present only when it is a positive number; providers
/// report "not specified" as either `null` or `0`.
///
/// - both bounds → their mean
/// - only `from` → `from * 1.2`
/// - only `to` → `to * 0.8`
/// - neither → `None`
///
/// # Examples
/// ```
/// use jobstats::services::salary::predict_salary;
///
/// assert_eq!(predict_salary(Some(50000.0), Some(70000.0)), Some(60000.0));
/// assert_eq!(predict_salary(Some(0.0), None), None);
/// ```
pub fn predict_salary(salary_from: Option<f64>, salary_to: Option<f64>) -> Option<f64> {
    let salary_from = salary_from.filter(|v| *v > 0.0);
    let salary_to = salary_to.filter(|v| *v > 0.0);

    match (salary_from, salary_to) {
        (Some(from), Some(to)) => Some((from + to) / 2.0),
        (Some(from), None) => Some(from * OPEN_TOP_FACTOR),
        (None, Some(to)) => Some(to * OPEN_BOTTOM_FACTOR),
        (None, None) => None,
    }
}
