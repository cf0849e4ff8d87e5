//! In-memory implementation of InvoiceStore for testing and development

use crate::core::invoice::{
    Invoice, InvoiceChanges, InvoiceStatus, LatestInvoice, NewInvoice, Revenue,
};
use crate::core::store::InvoiceStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory invoice store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// each statement takes the lock once, so a call never observes another
/// call's half-applied write.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<IndexMap<Uuid, Invoice>>>,
}

impl InMemoryInvoiceStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row, in insertion order
    pub fn all(&self) -> Result<Vec<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.values().cloned().collect())
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<()> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = Uuid::new_v4();
        invoices.insert(
            id,
            Invoice {
                id,
                customer_id: invoice.customer_id,
                amount: invoice.amount_in_cents,
                status: invoice.status,
                date: invoice.date,
            },
        );

        Ok(())
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(0);
        };

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match invoices.get_mut(&id) {
            Some(invoice) => {
                invoice.customer_id = changes.customer_id;
                invoice.amount = changes.amount_in_cents;
                invoice.status = changes.status;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(0);
        };

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(invoices.shift_remove(&id).map_or(0, |_| 1))
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.get(&id).cloned())
    }

    async fn fetch_revenue(&self) -> Result<Vec<Revenue>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut by_month: BTreeMap<String, i64> = BTreeMap::new();
        for invoice in invoices
            .values()
            .filter(|inv| inv.status == InvoiceStatus::Paid)
        {
            *by_month
                .entry(invoice.date.format("%Y-%m").to_string())
                .or_insert(0) += invoice.amount;
        }

        Ok(by_month
            .into_iter()
            .map(|(month, revenue)| Revenue { month, revenue })
            .collect())
    }

    async fn fetch_latest_invoices(&self, limit: usize) -> Result<Vec<LatestInvoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        // Stable sort keeps later insertions ahead within the same date
        let mut latest: Vec<&Invoice> = invoices.values().rev().collect();
        latest.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(latest
            .into_iter()
            .take(limit)
            .map(LatestInvoice::from)
            .collect())
    }
}
