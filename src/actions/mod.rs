//! Server-side actions behind the dashboard forms
//!
//! Each mutation validates its form, runs one store statement, and on
//! success revalidates the invoice list view and redirects to it. Store
//! failures become a [`State`] carrying a user-facing message.

pub mod auth;
pub mod data;
pub mod invoices;

pub use auth::{CREDENTIAL_SIGNIN, authenticate};
pub use invoices::{InvoiceActions, messages};

use crate::core::error::FieldErrors;
use serde::{Deserialize, Serialize};

/// Form state handed back to the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,

    #[serde(default)]
    pub message: Option<String>,
}

impl State {
    /// State carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }

    /// State carrying field errors and a message
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_serializes_like_the_page_expects() {
        let mut errors = FieldErrors::new();
        errors.insert("amount".into(), vec!["Please enter an amount greater than $0.".into()]);
        let state = State::invalid(errors, "Missing Fields. Failed to Create Invoice.");
        assert_eq!(
            serde_json::to_value(&state).expect("serialize"),
            json!({
                "errors": { "amount": ["Please enter an amount greater than $0."] },
                "message": "Missing Fields. Failed to Create Invoice."
            })
        );
    }

    #[test]
    fn test_initial_state_has_null_message() {
        assert_eq!(
            serde_json::to_value(State::default()).expect("serialize"),
            json!({ "message": null })
        );
    }
}
