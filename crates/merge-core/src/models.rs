use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single transaction read from one line of an input file.
///
/// Only ever built from fully parsed fields; the constructor itself does not
/// validate anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    label: String,
    amount: f64,
    occurred_on: NaiveDate,
}

impl Purchase {
    /// Build a purchase from already-typed values.
    pub fn new(label: impl Into<String>, amount: f64, occurred_on: NaiveDate) -> Self {
        Self {
            label: label.into(),
            amount,
            occurred_on,
        }
    }

    /// Free-text identifier from the first column.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Signed amount of the transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Calendar date the transaction happened on.
    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_on
    }
}

impl fmt::Display for Purchase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Purchase [label={}, amount={:.2}, date={}]",
            self.label,
            self.amount,
            self.occurred_on.format("%d-%m-%Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_accessors_return_constructor_values() {
        let p = Purchase::new("coffee", 4.5, date(2023, 11, 3));
        assert_eq!(p.label(), "coffee");
        assert_eq!(p.amount(), 4.5);
        assert_eq!(p.occurred_on(), date(2023, 11, 3));
    }

    #[test]
    fn test_display_includes_all_fields() {
        let p = Purchase::new("coffee", 4.5, date(2023, 11, 3));
        assert_eq!(
            p.to_string(),
            "Purchase [label=coffee, amount=4.50, date=03-11-2023]"
        );
    }

    #[test]
    fn test_display_negative_amount() {
        let p = Purchase::new("refund", -12.0, date(2024, 1, 15));
        assert_eq!(
            p.to_string(),
            "Purchase [label=refund, amount=-12.00, date=15-01-2024]"
        );
    }

    #[test]
    fn test_equality_is_field_wise() {
        let a = Purchase::new("tea", 2.25, date(2023, 11, 4));
        let b = Purchase::new("tea", 2.25, date(2023, 11, 4));
        let c = Purchase::new("tea", 2.25, date(2023, 11, 5));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
