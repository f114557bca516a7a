//! Summary statistics over the merged purchase list.

use merge_core::models::Purchase;

/// Sum of all amounts; `0.0` for an empty list.
pub fn total_value(purchases: &[Purchase]) -> f64 {
    purchases.iter().map(Purchase::amount).sum()
}

/// Largest amount, starting from a baseline of `0.0`.
///
/// A list whose amounts are all negative therefore reports `0.0`, not its
/// true maximum. Kept that way so reported figures stay comparable with
/// earlier runs.
pub fn max_value(purchases: &[Purchase]) -> f64 {
    purchases.iter().map(Purchase::amount).fold(0.0, f64::max)
}

/// True smallest amount, or `None` for an empty list.
pub fn min_value(purchases: &[Purchase]) -> Option<f64> {
    purchases.iter().map(Purchase::amount).reduce(f64::min)
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Run-level figures reported once every source has been read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
    /// Maximum with the `0.0` baseline, see [`max_value`].
    pub max: f64,
    pub min: Option<f64>,
}

impl Summary {
    pub fn from_purchases(purchases: &[Purchase]) -> Self {
        Self {
            count: purchases.len(),
            total: total_value(purchases),
            max: max_value(purchases),
            min: min_value(purchases),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn purchases(amounts: &[f64]) -> Vec<Purchase> {
        let day = NaiveDate::from_ymd_opt(2023, 11, 3).unwrap();
        amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| Purchase::new(format!("item{i}"), a, day))
            .collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── total_value ───────────────────────────────────────────────────────────

    #[test]
    fn test_total_value() {
        assert!(approx(total_value(&purchases(&[4.50, 10.00, 2.25])), 16.75));
    }

    #[test]
    fn test_total_value_empty() {
        assert_eq!(total_value(&[]), 0.0);
    }

    #[test]
    fn test_total_value_mixed_signs() {
        assert!(approx(total_value(&purchases(&[10.0, -4.0])), 6.0));
    }

    // ── max_value ─────────────────────────────────────────────────────────────

    #[test]
    fn test_max_value() {
        assert_eq!(max_value(&purchases(&[4.50, 10.00, 2.25])), 10.00);
    }

    #[test]
    fn test_max_value_all_negative_reports_zero_baseline() {
        assert_eq!(max_value(&purchases(&[-5.00, -2.00])), 0.0);
    }

    #[test]
    fn test_max_value_empty() {
        assert_eq!(max_value(&[]), 0.0);
    }

    // ── min_value ─────────────────────────────────────────────────────────

    #[test]
    fn test_min_value() {
        assert_eq!(min_value(&purchases(&[4.50, 10.00, 2.25])), Some(2.25));
        assert_eq!(min_value(&purchases(&[-5.00, -2.00])), Some(-5.0));
        assert_eq!(min_value(&[]), None);
    }

    // ── Summary ───────────────────────────────────────────────────────────────

    #[test]
    fn test_summary_from_purchases() {
        let summary = Summary::from_purchases(&purchases(&[4.50, 10.00, 2.25]));
        assert_eq!(summary.count, 3);
        assert!(approx(summary.total, 16.75));
        assert_eq!(summary.max, 10.0);
        assert_eq!(summary.min, Some(2.25));
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_purchases(&[]);
        assert_eq!(summary, Summary::default());
    }
}
