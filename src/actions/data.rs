//! Read hooks feeding the dashboard panels

use crate::core::invoice::{LatestInvoice, Revenue};
use crate::core::store::{InvoiceStore, LATEST_INVOICES_LIMIT};
use anyhow::{Context, Result};

/// Revenue per month for the revenue chart
pub async fn fetch_revenue(store: &dyn InvoiceStore) -> Result<Vec<Revenue>> {
    store
        .fetch_revenue()
        .await
        .context("Failed to fetch revenue data")
}

/// The newest invoices for the latest-invoices panel
pub async fn fetch_latest_invoices(store: &dyn InvoiceStore) -> Result<Vec<LatestInvoice>> {
    store
        .fetch_latest_invoices(LATEST_INVOICES_LIMIT)
        .await
        .context("Failed to fetch the latest invoices")
}
