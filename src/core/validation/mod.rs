//! Validation of submitted invoice forms
//!
//! [`InvoiceSchema`] describes the canonical invoice shape as a list of
//! field rules; sub-shapes are derived from it by omitting fields. A single
//! validation function reports every violated field at once, and callers
//! decide whether to surface the details or raise.

pub mod filters;
pub mod schema;
pub mod validators;

pub use schema::{FieldSpec, InvoiceForm, InvoiceSchema, ParsedFields, field};

use crate::core::invoice::InvoiceStatus;

/// A raw form value after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Status(InvoiceStatus),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_status(&self) -> Option<InvoiceStatus> {
        match self {
            FieldValue::Status(s) => Some(*s),
            _ => None,
        }
    }
}
