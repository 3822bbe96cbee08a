//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::payments: Review panel, table fragment, status dialog
//! - routes::dashboard: Status totals
//! - routes::account_creation: Section placeholder
//! - routes::navigation: Sidebar data as JSON

pub mod error;
pub mod routes;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use paydesk_config::Config;
use paydesk_core::{navigation, Completion, ReviewService, SidebarUser, ORGANIZATION};
use paydesk_utils::escape_html;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: ReviewService,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::account_creation::page_account_creation;
    use routes::dashboard::{api_summary, page_dashboard};
    use routes::navigation::api_navigation;
    use routes::payments::{
        api_panel, api_payments, htmx_cancel, htmx_confirm, htmx_payments_list, htmx_select_status,
        page_manage_payments,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/payments", get(api_payments))
        .route("/api/panel", get(api_panel))
        .route("/api/summary", get(api_summary))
        .route("/api/navigation", get(api_navigation))
        .route("/api/reload", post(api_reload))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/dashboard", get(page_dashboard))
        .route("/manage-payments", get(page_manage_payments))
        .route("/account-creation", get(page_account_creation))
        // HTMX partial routes
        .route("/payments/list", get(htmx_payments_list))
        .route("/payments/confirm", post(htmx_confirm))
        .route("/payments/cancel", post(htmx_cancel))
        .route("/payments/:id/status", post(htmx_select_status))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Re-fetch the payment list (unmount + mount)
async fn api_reload(state: State<AppState>) -> Json<serde_json::Value> {
    let body = match state.service.reload().await {
        Completion::Applied => serde_json::json!({
            "success": true,
            "message": "Payments reloaded",
        }),
        Completion::Failed => serde_json::json!({
            "success": false,
            "message": "Failed to fetch payments; see server log",
        }),
        Completion::Stale => serde_json::json!({
            "success": false,
            "message": "Reload superseded by a newer one",
        }),
    };
    Json(body)
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - {}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        ORGANIZATION,
        content
    )
}

/// Navigation sidebar with the signed-in user block
///
/// `current_section` is matched exactly against entry labels.
pub fn nav_sidebar(current_section: &str, user: &SidebarUser) -> String {
    let mut nav = format!(
        "<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b flex items-center gap-2'><span class='w-8 h-8 rounded-lg bg-indigo-600 text-white flex items-center justify-center font-bold'>IC</span><h1 class='text-lg font-bold text-indigo-600'>{}</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>",
        ORGANIZATION
    );

    for item in navigation(current_section) {
        let active_class = if item.active {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'{}>{}<span>{}</span></a></li>"#,
            item.path,
            active_class,
            if item.active { " aria-current='page'" } else { "" },
            item.icon.glyph(),
            item.label
        ));
    }

    nav.push_str(&format!(
        r#"</ul><div class='p-4 border-t flex items-center gap-3'><span class='w-9 h-9 rounded-full bg-gray-200 flex items-center justify-center text-sm font-semibold'>{}</span><div class='min-w-0'><p class='text-sm font-medium truncate'>{}</p><p class='text-xs text-gray-500 truncate'>{}</p></div></div></div>"#,
        escape_html(&user.initials()),
        escape_html(&user.name),
        escape_html(&user.email)
    ));
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    headers: &HeaderMap,
    title: &str,
    current_section: &str,
    user: &SidebarUser,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        format!(
            r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#,
            inner_content
        )
    } else {
        base_html(
            title,
            &format!(
                r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
                nav_sidebar(current_section, user),
                inner_content
            ),
        )
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process is stopped.
pub async fn start_server(config: Config, service: ReviewService) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState { service };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting payment console on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /dashboard (Status totals)");
    log::info!("  - /manage-payments (Payment review)");
    log::info!("  - /account-creation (Manual account creation)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use paydesk_core::mock::MockBackend;
    use paydesk_core::{MemorySessionStore, Payment, PaymentStatus, Session, UserSummary};
    use std::sync::Arc;

    pub fn sample_payments() -> Vec<Payment> {
        vec![
            Payment::new("p1", PaymentStatus::Unpaid)
                .with_user(UserSummary {
                    id: Some("2021-0001".to_string()),
                    name: Some("Ana".to_string()),
                    email: Some("ana@school.edu".to_string()),
                    course: Some("BSCS".to_string()),
                    year: Some(paydesk_core::YearValue::Text("2".to_string())),
                })
                .with_method("Cash"),
            Payment::new("p2", PaymentStatus::Paid)
                .with_user(UserSummary {
                    name: Some("Ben".to_string()),
                    course: Some("BSIT".to_string()),
                    ..Default::default()
                })
                .with_method("GCash")
                .with_transaction_id("GC-991"),
        ]
    }

    pub fn state_with(backend: MockBackend) -> (AppState, Arc<MockBackend>) {
        let backend = Arc::new(backend);
        let session = Arc::new(MemorySessionStore::new(Session {
            token: Some("tok".to_string()),
            name: Some("Carla Reyes".to_string()),
            email: None,
        }));
        let service = ReviewService::new(backend.clone(), session);
        (AppState { service }, backend)
    }

    pub fn test_state() -> AppState {
        state_with(MockBackend::new(sample_payments())).0
    }
}
