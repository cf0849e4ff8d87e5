//! Reusable field validators
//!
//! A field is validated in two steps: a coercer turns the raw form value
//! into a typed [`FieldValue`], then checks refine the coerced value.
//! Coercers see `None` when the form did not carry the field.

use super::FieldValue;
use crate::core::invoice::{InvoiceStatus, dollars_to_cents};

/// Message reported when a value cannot be read as a number
pub const NAN_MESSAGE: &str = "Expected number, received nan.";

/// Coercer: any string, present
pub fn string(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<FieldValue, String> + Send + Sync + Clone {
    move |raw: Option<&str>| match raw {
        Some(s) => Ok(FieldValue::Text(s.to_string())),
        None => Err(message.to_string()),
    }
}

/// Coercer: a present string with at least one non-whitespace character
pub fn required_text(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<FieldValue, String> + Send + Sync + Clone {
    move |raw: Option<&str>| match raw {
        Some(s) if !s.trim().is_empty() => Ok(FieldValue::Text(s.to_string())),
        _ => Err(message.to_string()),
    }
}

/// Coercer: number from its string form
///
/// An absent or empty value reads as `0`. Text that is not a finite decimal
/// number is rejected.
pub fn number() -> impl Fn(Option<&str>) -> Result<FieldValue, String> + Send + Sync + Clone {
    |raw: Option<&str>| {
        let s = raw.map(str::trim).unwrap_or("");
        if s.is_empty() {
            return Ok(FieldValue::Number(0.0));
        }
        match s.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(FieldValue::Number(n)),
            _ => Err(NAN_MESSAGE.to_string()),
        }
    }
}

/// Coercer: one of the invoice status literals
pub fn status(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<FieldValue, String> + Send + Sync + Clone {
    move |raw: Option<&str>| {
        raw.and_then(InvoiceStatus::parse)
            .map(FieldValue::Status)
            .ok_or_else(|| message.to_string())
    }
}

/// Check: number of dollars worth at least `min` cents once rounded
///
/// Amounts too large to convert are left to [`fits_cents`] unless negative.
pub fn min_cents(
    min: i64,
    message: &'static str,
) -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |value: &FieldValue| match value {
        FieldValue::Number(n) if dollars_to_cents(*n).map_or(*n < 0.0, |c| c < min) => {
            Err(message.to_string())
        }
        _ => Ok(()),
    }
}

/// Check: number of dollars whose cents fit the store
pub fn fits_cents(
    message: &'static str,
) -> impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |value: &FieldValue| match value {
        FieldValue::Number(n) if *n > 0.0 && dollars_to_cents(*n).is_none() => {
            Err(message.to_string())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === string() ===

    #[test]
    fn test_string_absent_returns_message() {
        let v = string("Required");
        assert_eq!(v(None), Err("Required".to_string()));
    }

    #[test]
    fn test_string_empty_is_accepted() {
        let v = string("Required");
        assert_eq!(v(Some("")), Ok(FieldValue::Text(String::new())));
    }

    // === required_text() ===

    #[test]
    fn test_required_text_rejects_blank() {
        let v = required_text("Please select a customer.");
        assert!(v(None).is_err());
        assert!(v(Some("")).is_err());
        assert!(v(Some("   ")).is_err());
    }

    #[test]
    fn test_required_text_keeps_value_as_sent() {
        let v = required_text("Please select a customer.");
        assert_eq!(v(Some("c1")), Ok(FieldValue::Text("c1".to_string())));
    }

    // === number() ===

    #[test]
    fn test_number_parses_decimal_string() {
        let v = number();
        assert_eq!(v(Some("10.50")), Ok(FieldValue::Number(10.5)));
        assert_eq!(v(Some(" 7 ")), Ok(FieldValue::Number(7.0)));
    }

    #[test]
    fn test_number_absent_or_empty_reads_as_zero() {
        let v = number();
        assert_eq!(v(None), Ok(FieldValue::Number(0.0)));
        assert_eq!(v(Some("")), Ok(FieldValue::Number(0.0)));
    }

    #[test]
    fn test_number_rejects_text_and_non_finite() {
        let v = number();
        assert_eq!(v(Some("ten")), Err(NAN_MESSAGE.to_string()));
        assert_eq!(v(Some("NaN")), Err(NAN_MESSAGE.to_string()));
        assert_eq!(v(Some("inf")), Err(NAN_MESSAGE.to_string()));
    }

    // === status() ===

    #[test]
    fn test_status_accepts_literals_only() {
        let v = status("Please select an invoice status.");
        assert_eq!(
            v(Some("paid")),
            Ok(FieldValue::Status(InvoiceStatus::Paid))
        );
        assert!(v(Some("overdue")).is_err());
        assert!(v(None).is_err());
    }

    // === min_cents() ===

    #[test]
    fn test_min_cents_rejects_zero_and_negative() {
        let v = min_cents(1, "too small");
        assert!(v(&FieldValue::Number(0.0)).is_err());
        assert!(v(&FieldValue::Number(-1.0)).is_err());
        assert!(v(&FieldValue::Number(0.01)).is_ok());
    }

    #[test]
    fn test_min_cents_rejects_amounts_rounding_to_zero() {
        let v = min_cents(1, "too small");
        assert!(v(&FieldValue::Number(0.004)).is_err());
        assert!(v(&FieldValue::Number(0.005)).is_ok());
    }

    #[test]
    fn test_min_cents_leaves_huge_positive_to_fits_cents() {
        let v = min_cents(1, "too small");
        assert!(v(&FieldValue::Number(1e20)).is_ok());
        assert!(v(&FieldValue::Number(-1e20)).is_err());
    }

    #[test]
    fn test_min_cents_ignores_non_numbers() {
        let v = min_cents(1, "too small");
        assert!(v(&FieldValue::Text("x".into())).is_ok());
    }

    // === fits_cents() ===

    #[test]
    fn test_fits_cents_rejects_huge_amounts() {
        let v = fits_cents("too large");
        assert!(v(&FieldValue::Number(1e20)).is_err());
        assert!(v(&FieldValue::Number(1e9)).is_ok());
        assert!(v(&FieldValue::Number(-1e20)).is_ok());
    }
}
