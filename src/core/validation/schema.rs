//! Invoice schema and derived form validators

use super::{FieldValue, filters, validators};
use crate::core::error::{FieldErrors, ValidationError};
use crate::core::form::FormData;
use crate::core::invoice::{InvoiceStatus, dollars_to_cents};
use indexmap::IndexMap;
use std::sync::{Arc, OnceLock};

/// Form field names, as submitted by the dashboard pages
pub mod field {
    pub const ID: &str = "id";
    pub const CUSTOMER_ID: &str = "customerId";
    pub const AMOUNT: &str = "amount";
    pub const STATUS: &str = "status";
    pub const DATE: &str = "date";
}

pub const CUSTOMER_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const AMOUNT_TOO_LARGE_MESSAGE: &str = "Please enter a smaller amount.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";
const REQUIRED_MESSAGE: &str = "Required";

type Filter = Arc<dyn Fn(&str) -> String + Send + Sync>;
type Coercer = Arc<dyn Fn(Option<&str>) -> Result<FieldValue, String> + Send + Sync>;
type Check = Arc<dyn Fn(&FieldValue) -> Result<(), String> + Send + Sync>;

/// Coerced values of the fields that survived validation, in schema order
pub type ParsedFields = IndexMap<&'static str, FieldValue>;

/// Rules for one field
#[derive(Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    filters: Vec<Filter>,
    coerce: Coercer,
    checks: Vec<Check>,
}

impl FieldSpec {
    pub fn new(
        name: &'static str,
        coerce: impl Fn(Option<&str>) -> Result<FieldValue, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            filters: Vec::new(),
            coerce: Arc::new(coerce),
            checks: Vec::new(),
        }
    }

    pub fn filter(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.filters.push(Arc::new(f));
        self
    }

    pub fn check(
        mut self,
        c: impl Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.checks.push(Arc::new(c));
        self
    }

    /// Validate one raw value; every failed check contributes a message
    fn validate(&self, raw: Option<&str>) -> Result<FieldValue, Vec<String>> {
        let filtered = raw.map(|value| {
            self.filters
                .iter()
                .fold(value.to_string(), |acc, f| f(&acc))
        });

        let value = (self.coerce)(filtered.as_deref()).map_err(|msg| vec![msg])?;

        let messages: Vec<String> = self
            .checks
            .iter()
            .filter_map(|check| check(&value).err())
            .collect();

        if messages.is_empty() {
            Ok(value)
        } else {
            Err(messages)
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("filters", &self.filters.len())
            .field("checks", &self.checks.len())
            .finish()
    }
}

/// An ordered set of field rules
#[derive(Debug, Clone)]
pub struct InvoiceSchema {
    fields: Vec<FieldSpec>,
}

impl InvoiceSchema {
    /// The canonical invoice shape
    pub fn base() -> Self {
        Self {
            fields: vec![
                FieldSpec::new(field::ID, validators::string(REQUIRED_MESSAGE)),
                FieldSpec::new(field::CUSTOMER_ID, validators::required_text(CUSTOMER_MESSAGE))
                    .filter(filters::trim()),
                FieldSpec::new(field::AMOUNT, validators::number())
                    .check(validators::min_cents(1, AMOUNT_MESSAGE))
                    .check(validators::fits_cents(AMOUNT_TOO_LARGE_MESSAGE)),
                FieldSpec::new(field::STATUS, validators::status(STATUS_MESSAGE)),
                FieldSpec::new(field::DATE, validators::string(REQUIRED_MESSAGE)),
            ],
        }
    }

    /// Derive a schema without the named fields
    pub fn omit(&self, names: &[&str]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|spec| !names.contains(&spec.name))
                .cloned()
                .collect(),
        }
    }

    /// Validate every field of the schema against the form
    ///
    /// Fields the form carries but the schema does not know are ignored.
    /// All violations are reported together, keyed by field name.
    pub fn safe_parse(&self, form: &FormData) -> Result<ParsedFields, FieldErrors> {
        let mut parsed = ParsedFields::new();
        let mut errors = FieldErrors::new();

        for spec in &self.fields {
            match spec.validate(form.get(spec.name)) {
                Ok(value) => {
                    parsed.insert(spec.name, value);
                }
                Err(messages) => {
                    errors.insert(spec.name.to_string(), messages);
                }
            }
        }

        if errors.is_empty() {
            Ok(parsed)
        } else {
            Err(errors)
        }
    }
}

/// The fields a user may submit for an invoice: everything but `id` and `date`
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceForm {
    pub customer_id: String,
    /// Integer cents, rounded from the submitted dollars
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    /// Shape shared by create and update
    pub fn schema() -> &'static InvoiceSchema {
        static SCHEMA: OnceLock<InvoiceSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| InvoiceSchema::base().omit(&[field::ID, field::DATE]))
    }

    /// Structured validation: typed form, or every field error
    pub fn safe_parse(form: &FormData) -> Result<Self, FieldErrors> {
        let parsed = Self::schema().safe_parse(form)?;
        Self::from_parsed(&parsed).ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.insert(
                "form".to_string(),
                vec!["Unexpected field types after validation.".to_string()],
            );
            errors
        })
    }

    /// Raising validation: the failure becomes a [`ValidationError`]
    pub fn parse(form: &FormData) -> Result<Self, ValidationError> {
        Self::safe_parse(form).map_err(ValidationError::FieldErrors)
    }

    fn from_parsed(parsed: &ParsedFields) -> Option<Self> {
        Some(Self {
            customer_id: parsed.get(field::CUSTOMER_ID)?.as_text()?.to_string(),
            amount_in_cents: dollars_to_cents(parsed.get(field::AMOUNT)?.as_number()?)?,
            status: parsed.get(field::STATUS)?.as_status()?,
        })
    }
}
