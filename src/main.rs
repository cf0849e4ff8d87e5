//! Invoice dashboard server
//!
//! Configuration comes from the YAML file named by `INVOICES_CONFIG`;
//! `DATABASE_URL` overrides the configured database.

use anyhow::Result;
use invoices::config::DashboardConfig;
use invoices::core::{InMemoryCredentialsProvider, InvoiceStore};
use invoices::server::ServerBuilder;
use invoices::storage::InMemoryInvoiceStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::var("INVOICES_CONFIG").ok();
    let mut config = DashboardConfig::load(config_path.as_deref())?;
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config = config.with_database_url(url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .init();

    let store = open_store(&config).await?;

    let mut provider = InMemoryCredentialsProvider::new();
    if let (Ok(email), Ok(password)) = (
        std::env::var("DASHBOARD_USER_EMAIL"),
        std::env::var("DASHBOARD_USER_PASSWORD"),
    ) {
        tracing::info!(%email, "Registered dashboard account");
        provider = provider.with_account(email, password);
    }

    let bind = config.server.bind.clone();
    ServerBuilder::new()
        .with_shared_store(store)
        .with_credentials_provider(provider)
        .with_config(config)
        .serve(&bind)
        .await
}

#[cfg(feature = "mysql")]
async fn open_store(config: &DashboardConfig) -> Result<Arc<dyn InvoiceStore>> {
    use invoices::storage::{MysqlInvoiceStore, mysql};

    match &config.database {
        Some(db) => {
            let pool = mysql::connect(&db.url, db.max_connections).await?;
            mysql::ensure_schema(&pool).await?;
            tracing::info!(max_connections = db.max_connections, "Using MySQL invoice store");
            Ok(Arc::new(MysqlInvoiceStore::new(pool)))
        }
        None => {
            tracing::info!("No database configured, using in-memory invoice store");
            Ok(Arc::new(InMemoryInvoiceStore::new()))
        }
    }
}

#[cfg(not(feature = "mysql"))]
async fn open_store(config: &DashboardConfig) -> Result<Arc<dyn InvoiceStore>> {
    if config.database.is_some() {
        tracing::warn!("Database configured but the `mysql` feature is disabled; using in-memory store");
    }
    Ok(Arc::new(InMemoryInvoiceStore::new()))
}
