//! Payments API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_payments: Filtered payment list (JSON)
//! - api_panel: Panel snapshot (JSON)
//! - htmx_payments_list: Payment table (HTML fragment)
//! - htmx_select_status: Open the confirmation dialog (HTML fragment)
//! - htmx_confirm: Send the shown change, close the dialog (HTMX)
//! - htmx_cancel: Discard the shown change, close the dialog (HTMX)

use super::page::{render_dialog, render_table, NEW_STATUS, PAYMENTS_CHANGED, PAYMENT_ID};
use crate::{ApiError, AppState};
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use paydesk_core::{FilterState, Payment, PaymentStatus, PanelSnapshot};
use std::collections::HashMap;

/// Filter state from `q`, `course`, `year`, `status` and `method` parameters
pub(crate) fn filter_from_params(params: &HashMap<String, String>) -> FilterState {
    let get = |key: &str| params.get(key).map(String::as_str);
    FilterState::from_params(get("q"), get("course"), get("year"), get("status"), get("method"))
}

fn status_field(form: &HashMap<String, String>) -> Result<PaymentStatus, ApiError> {
    let raw = form.get(NEW_STATUS).map(String::as_str).unwrap_or_default();
    raw.parse().map_err(|message| ApiError::BadRequest { message })
}

/// Payment id and status a dialog button was rendered for
fn change_fields(form: &HashMap<String, String>) -> Result<(String, PaymentStatus), ApiError> {
    let id = form
        .get(PAYMENT_ID)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest {
            message: format!("Missing {}", PAYMENT_ID),
        })?;
    Ok((id.clone(), status_field(form)?))
}

/// Get filtered payments (JSON API)
pub async fn api_payments(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Json<Vec<Payment>> {
    state.service.ensure_mounted().await;
    Json(state.service.filtered(&filter_from_params(&params)).await)
}

/// Get the panel snapshot (JSON API)
pub async fn api_panel(state: State<AppState>) -> Json<PanelSnapshot> {
    Json(state.service.snapshot().await)
}

/// HTMX: Payment table - re-rendered on every filter change
pub async fn htmx_payments_list(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    state.service.ensure_mounted().await;
    let payments = state.service.filtered(&filter_from_params(&params)).await;
    Html(render_table(&payments))
}

/// HTMX: Status selected in a row - open the confirmation dialog
///
/// An unknown id leaves the panel as it was and returns the current dialog.
pub async fn htmx_select_status(
    state: State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let status = status_field(&form)?;
    state.service.select_status(&id, status).await;
    Ok(Html(render_dialog(&state.service.dialog().await)))
}

/// HTMX: Confirm the change the dialog was showing
///
/// A change that is no longer pending sends nothing; the current dialog is
/// returned either way.
pub async fn htmx_confirm(
    state: State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let (id, status) = change_fields(&form)?;
    state.service.confirm(&id, status).await;
    let dialog = render_dialog(&state.service.dialog().await);
    Ok(([("HX-Trigger", PAYMENTS_CHANGED)], Html(dialog)))
}

/// HTMX: Cancel the change the dialog was showing
pub async fn htmx_cancel(
    state: State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let (id, status) = change_fields(&form)?;
    state.service.cancel(&id, status).await;
    let dialog = render_dialog(&state.service.dialog().await);
    Ok(([("HX-Trigger", PAYMENTS_CHANGED)], Html(dialog)))
}
