//! ServerBuilder for fluent API to build the dashboard server

use super::handlers::AppState;
use super::router::build_dashboard_routes;
use crate::actions::InvoiceActions;
use crate::config::DashboardConfig;
use crate::core::auth::CredentialsProvider;
use crate::core::cache::{InMemoryRouteCache, RouteCache};
use crate::core::clock::Clock;
use crate::core::store::InvoiceStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the dashboard HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryInvoiceStore::new())
///     .with_credentials_provider(provider)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    route_cache: Option<Arc<dyn RouteCache>>,
    credentials_provider: Option<Arc<dyn CredentialsProvider>>,
    clock: Option<Arc<dyn Clock>>,
    config: DashboardConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            route_cache: None,
            credentials_provider: None,
            clock: None,
            config: DashboardConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared invoice store (required unless `with_store` is used)
    pub fn with_shared_store(mut self, store: Arc<dyn InvoiceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the route cache to revalidate; defaults to an in-memory cache
    pub fn with_route_cache(mut self, cache: impl RouteCache + 'static) -> Self {
        self.route_cache = Some(Arc::new(cache));
        self
    }

    /// Set the identity provider used by the login route (required)
    pub fn with_credentials_provider(
        mut self,
        provider: impl CredentialsProvider + 'static,
    ) -> Self {
        self.credentials_provider = Some(Arc::new(provider));
        self
    }

    /// Set the clock dating new invoices; defaults to the system clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the state shared by every handler
    pub fn build_state(&mut self) -> Result<AppState> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("InvoiceStore is required. Call .with_store()"))?;

        let credentials_provider = self.credentials_provider.take().ok_or_else(|| {
            anyhow::anyhow!("CredentialsProvider is required. Call .with_credentials_provider()")
        })?;

        let route_cache = self
            .route_cache
            .take()
            .unwrap_or_else(|| Arc::new(InMemoryRouteCache::new()));

        let mut actions = InvoiceActions::new(store, route_cache)
            .with_list_path(self.config.routes.invoices.clone())
            .with_delete_enabled(self.config.actions.delete_enabled);
        if let Some(clock) = self.clock.take() {
            actions = actions.with_clock(clock);
        }

        Ok(AppState {
            actions,
            credentials_provider,
            routes: self.config.routes.clone(),
        })
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;

        let mut app = build_dashboard_routes(state);
        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, "Invoice dashboard listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Invoice dashboard stopped");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Signal that stopped the dashboard server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Resolve with whichever signal fires first
async fn first_signal(
    interrupt: impl std::future::Future<Output = ()>,
    terminate: impl std::future::Future<Output = ()>,
) -> ShutdownSignal {
    tokio::select! {
        _ = interrupt => ShutdownSignal::Interrupt,
        _ = terminate => ShutdownSignal::Terminate,
    }
}

/// Wait for Ctrl+C or SIGTERM; a handler that cannot be installed never fires
async fn shutdown_signal() {
    use tokio::signal;

    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C; dashboard ignores it");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM; dashboard ignores it");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = first_signal(interrupt, terminate).await;
    tracing::info!(signal = %received, "Dashboard stopping, finishing in-flight form posts");
}
