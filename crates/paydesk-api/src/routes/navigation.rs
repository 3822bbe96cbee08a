//! Navigation routes - sidebar data for the current section

use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use paydesk_core::{navigation, NavItem, SidebarUser, ORGANIZATION};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub organization: &'static str,
    pub items: Vec<NavItem>,
    pub user: SidebarUser,
}

/// Navigation entries with active flags plus the sidebar user (JSON API)
pub async fn api_navigation(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Json<NavigationResponse> {
    let section = params.get("section").map(String::as_str).unwrap_or_default();
    Json(NavigationResponse {
        organization: ORGANIZATION,
        items: navigation(section),
        user: state.service.sidebar_user(),
    })
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::test_state;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn navigation_json(uri: &str) -> serde_json::Value {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_navigation_active_entry() {
        let json = navigation_json("/api/navigation?section=Manage%20Payments").await;
        assert_eq!(json["organization"], "Integrated Confederacy");
        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1]["label"], "Manage Payments");
        assert_eq!(items[1]["active"], true);
        assert_eq!(items[0]["active"], false);
        assert_eq!(items[2]["icon"], "user-plus");
        assert_eq!(json["user"]["name"], "Carla Reyes");
        assert_eq!(json["user"]["email"], "admin@example.com");
    }

    #[tokio::test]
    async fn test_navigation_without_section() {
        let json = navigation_json("/api/navigation").await;
        let items = json["items"].as_array().unwrap();
        assert!(items.iter().all(|item| item["active"] == false));
    }
}
