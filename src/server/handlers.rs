//! HTTP handlers for the dashboard forms and panels
//!
//! Form posts arrive as `application/x-www-form-urlencoded`. A successful
//! mutation answers `303 See Other` pointing at the invoice list view.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::actions::{self, InvoiceActions, State as FormState, data};
use crate::config::RoutesConfig;
use crate::core::auth::CredentialsProvider;
use crate::core::cache::ActionOutcome;
use crate::core::error::{DashboardError, StorageError};
use crate::core::form::FormData;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
    pub credentials_provider: Arc<dyn CredentialsProvider>,
    pub routes: RoutesConfig,
}

/// Render the outcome of a form action
///
/// Field errors answer 422, a bare message (store failure) answers 500.
fn outcome_response(outcome: ActionOutcome<FormState>) -> Response {
    match outcome {
        ActionOutcome::Redirect(to) => Redirect::to(&to).into_response(),
        ActionOutcome::State(state) => state_response(state),
    }
}

fn state_response(state: FormState) -> Response {
    let status = if state.errors.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(state)).into_response()
}

fn store_error(e: anyhow::Error) -> DashboardError {
    DashboardError::Storage(StorageError::QueryError {
        backend: "invoice store".to_string(),
        message: format!("{:#}", e),
    })
}

/// POST /dashboard/invoices/create
pub async fn create_invoice(State(state): State<AppState>, Form(form): Form<FormData>) -> Response {
    outcome_response(
        state
            .actions
            .create_invoice(&FormState::default(), &form)
            .await,
    )
}

/// POST /dashboard/invoices/{id}/edit
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<FormData>,
) -> Result<Response, DashboardError> {
    let outcome = state.actions.update_invoice(&id, &form).await?;
    Ok(outcome_response(outcome))
}

/// POST /dashboard/invoices/{id}/delete
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, DashboardError> {
    match state.actions.delete_invoice(&id).await? {
        None => Ok(StatusCode::NO_CONTENT.into_response()),
        Some(form_state) => Ok(state_response(form_state)),
    }
}

/// POST /login
///
/// A relative `redirectTo` field overrides the default landing page.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<FormData>,
) -> Result<Response, DashboardError> {
    let landing = form
        .get("redirectTo")
        .filter(|to| to.starts_with('/') && !to.starts_with("//"))
        .unwrap_or(state.routes.after_login.as_str())
        .to_string();

    match actions::authenticate(None, &form, state.credentials_provider.as_ref()).await? {
        None => Ok(Redirect::to(&landing).into_response()),
        Some(code) => Ok((StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()),
    }
}

/// GET /dashboard/revenue
pub async fn revenue(State(state): State<AppState>) -> Result<Json<Value>, DashboardError> {
    let revenue = data::fetch_revenue(state.actions.store().as_ref())
        .await
        .map_err(store_error)?;
    Ok(Json(json!({ "revenue": revenue })))
}

/// GET /dashboard/invoices/latest
pub async fn latest_invoices(State(state): State<AppState>) -> Result<Json<Value>, DashboardError> {
    let invoices = data::fetch_latest_invoices(state.actions.store().as_ref())
        .await
        .map_err(store_error)?;
    Ok(Json(json!({
        "invoices": invoices,
        "count": invoices.len()
    })))
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
