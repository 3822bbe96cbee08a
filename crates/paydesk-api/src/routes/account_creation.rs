//! Manual Account Creation section
//!
//! Accounts are created by the backend; this console only reserves the
//! navigation slot.

use crate::AppState;
use paydesk_core::navigation::ACCOUNT_CREATION;

/// Manual Account Creation page
pub async fn page_account_creation(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>{}</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 text-gray-600'>
            <p>Account creation is handled by the payments backend.</p>
            <p class='mt-2 text-sm'>Use <a href='/manage-payments' class='text-indigo-600 hover:underline'>Manage Payments</a> to review submitted payments.</p>
        </div>"#,
        ACCOUNT_CREATION
    );

    let user = state.service.sidebar_user();
    axum::response::Html(crate::page_response(&headers, ACCOUNT_CREATION, ACCOUNT_CREATION, &user, &inner_content))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::state_with;
    use crate::test_support::sample_payments;
    use axum::body::Body;
    use axum::http::Request;
    use paydesk_core::mock::MockBackend;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_placeholder_does_not_fetch() {
        let (state, backend) = state_with(MockBackend::new(sample_payments()));
        let app = create_router(state);
        let response = app
            .oneshot(Request::get("/account-creation").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Manual Account Creation"));
        assert!(html.contains("aria-current='page'>👤<span>Manual Account Creation</span>"));
        assert!(backend.calls().is_empty());
    }
}
