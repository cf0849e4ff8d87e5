//! Route table of the dashboard

use super::handlers::{
    AppState, create_invoice, delete_invoice, health_check, latest_invoices, login, revenue,
    update_invoice,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the dashboard routes
///
/// - GET  /health, /healthz - Liveness
/// - POST /dashboard/invoices/create - Create an invoice
/// - POST /dashboard/invoices/{id}/edit - Update an invoice
/// - POST /dashboard/invoices/{id}/delete - Delete an invoice
/// - GET  /dashboard/invoices/latest - Latest invoices panel
/// - GET  /dashboard/revenue - Revenue chart data
/// - POST /login - Sign in with credentials
pub fn build_dashboard_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/dashboard/invoices/create", post(create_invoice))
        .route("/dashboard/invoices/latest", get(latest_invoices))
        .route("/dashboard/invoices/{id}/edit", post(update_invoice))
        .route("/dashboard/invoices/{id}/delete", post(delete_invoice))
        .route("/dashboard/revenue", get(revenue))
        .route("/login", post(login))
        .with_state(state)
}
