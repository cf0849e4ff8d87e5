//! Reusable field filters
//!
//! Filters rewrite a raw form value before it is coerced

/// Filter: trim surrounding whitespace
pub fn trim() -> impl Fn(&str) -> String + Send + Sync + Clone {
    |value: &str| value.trim().to_string()
}
