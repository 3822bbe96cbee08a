//! Dashboard API endpoints

use crate::AppState;
use axum::extract::State;
use axum::Json;
use paydesk_core::{CourseBreakdown, StatusSummary};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: StatusSummary,
    pub paid_percent: u32,
    pub courses: Vec<CourseBreakdown>,
}

/// Status totals and per-course breakdown (JSON API)
pub async fn api_summary(state: State<AppState>) -> Json<SummaryResponse> {
    state.service.ensure_mounted().await;
    let summary = state.service.summary().await;
    Json(SummaryResponse {
        paid_percent: summary.paid_percent(),
        summary,
        courses: state.service.course_breakdown().await,
    })
}
