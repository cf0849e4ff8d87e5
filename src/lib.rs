//! # Invoice Dashboard
//!
//! Server-side backend for an invoice dashboard: validates invoice forms,
//! persists invoices through a pluggable store, keeps the invoice list view
//! fresh, and signs users in through a credentials provider.
//!
//! ## Features
//!
//! - **Schema Validation**: Every invalid field is reported at once, keyed by field name
//! - **Form Actions**: Create, update and delete with redirect-after-post
//! - **Route Cache**: Successful writes revalidate the invoice list view
//! - **Pluggable Storage**: In-memory by default, MySQL behind the `mysql` feature
//! - **Read Hooks**: Monthly revenue and the latest invoices for the dashboard panels
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoices::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemoryInvoiceStore::new())
//!     .with_credentials_provider(
//!         InMemoryCredentialsProvider::new().with_account("user@nextmail.com", "123456"),
//!     )
//!     .build()?;
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ActionOutcome, Clock, CredentialsProvider, DashboardError, DashboardResult, FieldErrors,
        FixedClock, FormData, InMemoryCredentialsProvider, InMemoryRouteCache, Invoice,
        InvoiceChanges, InvoiceForm, InvoiceSchema, InvoiceStatus, InvoiceStore, LatestInvoice,
        NewInvoice, ProviderError, Revenue, RouteCache, SystemClock, ValidationError,
    };

    // === Actions ===
    pub use crate::actions::{CREDENTIAL_SIGNIN, InvoiceActions, State, authenticate};

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;

    #[cfg(feature = "mysql")]
    pub use crate::storage::MysqlInvoiceStore;

    // === Server ===
    pub use crate::config::DashboardConfig;
    pub use crate::server::{AppState, ServerBuilder};

    // === External re-exports ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
