//! Invoice store trait and the statements it runs
//!
//! The store is an opaque SQL-executing dependency: each mutation issues a
//! single parameterized statement and either succeeds or returns an error.

use crate::core::invoice::{Invoice, InvoiceChanges, LatestInvoice, NewInvoice, Revenue};
use anyhow::Result;
use async_trait::async_trait;

/// Parameterized statements; values are always bound, never concatenated
pub mod statements {
    pub const INSERT_INVOICE: &str =
        "INSERT INTO invoices (customer_id, amount, status, date) VALUES (?, ?, ?, ?)";

    pub const UPDATE_INVOICE: &str =
        "UPDATE invoices SET customer_id = ?, amount = ?, status = ? WHERE id = ?";

    pub const DELETE_INVOICE: &str = "DELETE FROM invoices WHERE id = ?";
}

/// Number of rows shown by the latest-invoices panel
pub const LATEST_INVOICES_LIMIT: usize = 5;

/// Persistence for invoice rows
///
/// Implementations assign `id` on insert. Identifiers are taken as strings
/// because the caller only ever holds their string form; an identifier the
/// backend cannot interpret matches no row.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert one invoice row
    async fn insert(&self, invoice: NewInvoice) -> Result<()>;

    /// Update the mutable fields of one row, returning the rows affected
    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64>;

    /// Delete one row, returning the rows affected
    async fn delete(&self, id: &str) -> Result<u64>;

    /// Get a row by id
    async fn get(&self, id: &str) -> Result<Option<Invoice>>;

    /// Paid revenue per month, oldest month first
    async fn fetch_revenue(&self) -> Result<Vec<Revenue>>;

    /// Most recent invoices, newest first
    async fn fetch_latest_invoices(&self, limit: usize) -> Result<Vec<LatestInvoice>>;
}
