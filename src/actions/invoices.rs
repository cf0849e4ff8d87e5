//! Create, update and delete actions for invoices

use super::State;
use crate::core::cache::{ActionOutcome, RouteCache, finalize};
use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{ActionError, DashboardResult};
use crate::core::form::FormData;
use crate::core::invoice::{InvoiceChanges, NewInvoice};
use crate::core::store::InvoiceStore;
use crate::core::validation::InvoiceForm;
use std::sync::Arc;

/// User-facing messages returned by the invoice actions
pub mod messages {
    pub const CREATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Create Invoice.";
    pub const CREATE_DATABASE_ERROR: &str = "Database Error: Failed to Create Invoice.";
    pub const UPDATE_DATABASE_ERROR: &str = "Database Error: Failed to Update Invoice.";
    pub const DELETE_DATABASE_ERROR: &str = "Database Error: Failed to Delete Invoice.";
    pub const DELETE_FAILED: &str = "Failed to Delete Invoice";
}

/// Invoice mutation pipeline
///
/// Holds the collaborators every action needs: the store, the route cache
/// to revalidate, and the clock that dates new invoices.
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn RouteCache>,
    clock: Arc<dyn Clock>,
    list_path: String,
    delete_enabled: bool,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<dyn RouteCache>) -> Self {
        Self {
            store,
            cache,
            clock: Arc::new(SystemClock),
            list_path: "/dashboard/invoices".to_string(),
            delete_enabled: false,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Path of the invoice list view, revalidated and redirected to on success
    pub fn with_list_path(mut self, path: impl Into<String>) -> Self {
        self.list_path = path.into();
        self
    }

    /// Let delete run its statement instead of failing unconditionally
    pub fn with_delete_enabled(mut self, enabled: bool) -> Self {
        self.delete_enabled = enabled;
        self
    }

    pub fn store(&self) -> &Arc<dyn InvoiceStore> {
        &self.store
    }

    pub fn list_path(&self) -> &str {
        &self.list_path
    }

    /// Create an invoice from a submitted form
    ///
    /// Validation failures come back as a state listing every invalid
    /// field; nothing is written. The previous state is not consulted.
    pub async fn create_invoice(&self, _prev: &State, form: &FormData) -> ActionOutcome<State> {
        let invoice = match InvoiceForm::safe_parse(form) {
            Ok(invoice) => invoice,
            Err(errors) => {
                tracing::warn!(fields = ?errors.keys().collect::<Vec<_>>(), "Invoice form rejected");
                return ActionOutcome::State(State::invalid(
                    errors,
                    messages::CREATE_MISSING_FIELDS,
                ));
            }
        };

        let amount_in_cents = invoice.amount_in_cents;
        let date = self.clock.today();

        let new_invoice = NewInvoice {
            customer_id: invoice.customer_id,
            amount_in_cents,
            status: invoice.status,
            date,
        };

        if let Err(e) = self.store.insert(new_invoice).await {
            tracing::error!(error = %e, "Failed to create invoice");
            return ActionOutcome::State(State::message(messages::CREATE_DATABASE_ERROR));
        }

        tracing::info!(amount = amount_in_cents, status = %invoice.status, %date, "Invoice created");
        finalize(self.cache.as_ref(), &self.list_path)
    }

    /// Update the customer, amount and status of invoice `id`
    ///
    /// An invalid form raises a validation error before any statement runs.
    /// The invoice date is never touched.
    pub async fn update_invoice(
        &self,
        id: &str,
        form: &FormData,
    ) -> DashboardResult<ActionOutcome<State>> {
        let invoice = InvoiceForm::parse(form)?;
        let amount_in_cents = invoice.amount_in_cents;

        let changes = InvoiceChanges {
            customer_id: invoice.customer_id,
            amount_in_cents,
            status: invoice.status,
        };

        match self.store.update(id, changes).await {
            Ok(0) => {
                tracing::warn!(invoice_id = %id, "Update matched no invoice");
            }
            Ok(_) => {
                tracing::info!(invoice_id = %id, amount = amount_in_cents, "Invoice updated");
            }
            Err(e) => {
                tracing::error!(invoice_id = %id, error = %e, "Failed to update invoice");
                return Ok(ActionOutcome::State(State::message(
                    messages::UPDATE_DATABASE_ERROR,
                )));
            }
        }

        Ok(finalize(self.cache.as_ref(), &self.list_path))
    }

    /// Delete invoice `id`
    ///
    /// Unless delete has been explicitly enabled, every call fails with
    /// "Failed to Delete Invoice" and no statement runs. When enabled, a
    /// successful delete revalidates the list view and returns nothing; it
    /// does not redirect.
    pub async fn delete_invoice(&self, id: &str) -> DashboardResult<Option<State>> {
        if !self.delete_enabled {
            tracing::warn!(invoice_id = %id, "Delete requested while disabled");
            return Err(ActionError::Failed {
                action: "delete_invoice".to_string(),
                message: messages::DELETE_FAILED.to_string(),
            }
            .into());
        }

        match self.store.delete(id).await {
            Ok(affected) => {
                tracing::info!(invoice_id = %id, affected, "Invoice deleted");
                self.cache.revalidate_path(&self.list_path);
                Ok(None)
            }
            Err(e) => {
                tracing::error!(invoice_id = %id, error = %e, "Failed to delete invoice");
                Ok(Some(State::message(messages::DELETE_DATABASE_ERROR)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::InMemoryRouteCache;
    use crate::core::clock::FixedClock;
    use crate::core::invoice::InvoiceStatus;
    use crate::storage::InMemoryInvoiceStore;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }

    fn setup() -> (InvoiceActions, InMemoryInvoiceStore, InMemoryRouteCache) {
        let store = InMemoryInvoiceStore::new();
        let cache = InMemoryRouteCache::new();
        let actions = InvoiceActions::new(Arc::new(store.clone()), Arc::new(cache.clone()))
            .with_clock(Arc::new(FixedClock(today())));
        (actions, store, cache)
    }

    #[tokio::test]
    async fn test_create_stores_cents_and_today() {
        let (actions, store, cache) = setup();
        let form = FormData::from_pairs([
            ("customerId", "c1"),
            ("amount", "10.50"),
            ("status", "pending"),
        ]);

        let outcome = actions.create_invoice(&State::default(), &form).await;

        assert_eq!(outcome.redirect_target(), Some("/dashboard/invoices"));
        let rows = store.all().expect("snapshot");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, 1050);
        assert_eq!(rows[0].status, InvoiceStatus::Pending);
        assert_eq!(rows[0].date, today());
        assert_eq!(cache.revision("/dashboard/invoices"), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_form_writes_nothing() {
        let (actions, store, cache) = setup();
        let form = FormData::from_pairs([("amount", "0")]);

        let state = actions
            .create_invoice(&State::default(), &form)
            .await
            .into_state()
            .expect("should stay on the page");

        assert_eq!(state.message.as_deref(), Some(messages::CREATE_MISSING_FIELDS));
        let errors = state.errors.expect("field errors");
        assert_eq!(
            errors.keys().collect::<Vec<_>>(),
            vec!["customerId", "amount", "status"]
        );
        assert!(store.all().expect("snapshot").is_empty());
        assert_eq!(cache.revision("/dashboard/invoices"), 0);
    }

    #[tokio::test]
    async fn test_update_invalid_form_raises() {
        let (actions, _store, cache) = setup();
        let form = FormData::from_pairs([("customerId", "c1"), ("amount", "abc")]);

        let result = actions.update_invoice("any", &form).await;

        assert!(matches!(
            result,
            Err(crate::core::error::DashboardError::Validation(_))
        ));
        assert_eq!(cache.revision("/dashboard/invoices"), 0);
    }

    #[tokio::test]
    async fn test_delete_always_fails_by_default() {
        let (actions, store, _cache) = setup();
        store
            .insert(NewInvoice {
                customer_id: "c1".into(),
                amount_in_cents: 100,
                status: InvoiceStatus::Paid,
                date: today(),
            })
            .await
            .expect("insert");
        let id = store.all().expect("snapshot")[0].id.to_string();

        let err = actions.delete_invoice(&id).await.expect_err("delete is disabled");

        assert_eq!(err.to_string(), "Failed to Delete Invoice");
        assert_eq!(store.all().expect("snapshot").len(), 1);
    }

    #[tokio::test]
    async fn test_enabled_delete_removes_and_revalidates() {
        let (actions, store, cache) = setup();
        let actions = actions.with_delete_enabled(true);
        store
            .insert(NewInvoice {
                customer_id: "c1".into(),
                amount_in_cents: 100,
                status: InvoiceStatus::Paid,
                date: today(),
            })
            .await
            .expect("insert");
        let id = store.all().expect("snapshot")[0].id.to_string();

        let result = actions.delete_invoice(&id).await.expect("delete runs");

        assert!(result.is_none());
        assert!(store.all().expect("snapshot").is_empty());
        assert_eq!(cache.revision("/dashboard/invoices"), 1);
    }
}
