//! Dashboard page rendering

use crate::AppState;
use paydesk_core::navigation::DASHBOARD;
use paydesk_core::{CourseBreakdown, PaymentStatus, StatusSummary, StatusTone};

fn status_card(label: &str, count: usize, tone: StatusTone) -> String {
    format!(
        "<div class='bg-white p-4 rounded-lg border-l-4 {}'><p class='text-sm'>{}</p><p class='text-2xl font-bold text-gray-900'>{}</p></div>",
        tone.css_class(),
        label,
        count
    )
}

fn render_breakdown(rows: &[CourseBreakdown]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                "<tr class='border-b'><td class='px-3 py-2 font-medium'>{}</td><td class='px-3 py-2 text-center'>{}</td><td class='px-3 py-2 text-center'>{}</td><td class='px-3 py-2 text-center'>{}</td><td class='px-3 py-2 text-center'>{}</td></tr>",
                row.course,
                row.summary.unpaid,
                row.summary.pending,
                row.summary.paid,
                row.summary.total
            )
        })
        .collect();
    format!(
        "<table class='w-full text-sm'><thead><tr class='border-b text-left'><th class='px-3 py-2'>Course</th><th class='px-3 py-2 text-center'>Unpaid</th><th class='px-3 py-2 text-center'>Pending</th><th class='px-3 py-2 text-center'>Paid</th><th class='px-3 py-2 text-center'>Total</th></tr></thead><tbody>{}</tbody></table>",
        body
    )
}

/// Render the dashboard body from a summary
pub fn render_dashboard(summary: &StatusSummary, courses: &[CourseBreakdown]) -> String {
    let cards: String = PaymentStatus::ALL
        .iter()
        .map(|status| status_card(status.as_str(), summary.count(*status), StatusTone::for_status(Some(*status))))
        .collect();

    format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Dashboard</h2></div>
        <div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-6'>
            <div class='bg-indigo-50 p-4 rounded-lg border border-indigo-200'><p class='text-sm text-indigo-600'>Total Payments</p><p class='text-2xl font-bold text-indigo-700'>{}</p></div>
            {}
        </div>
        <div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>By Course</h3>
                {}
            </div>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>Collection</h3>
                <p class='text-4xl font-bold text-green-600'>{}%</p>
                <p class='text-sm text-gray-500 mt-1'>of payments marked Paid</p>
                <a href='/manage-payments' class='inline-block mt-4 text-indigo-600 hover:underline'>Review payments</a>
            </div>
        </div>"#,
        summary.total,
        cards,
        render_breakdown(courses),
        summary.paid_percent()
    )
}

/// Dashboard page
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    state.service.ensure_mounted().await;
    let summary = state.service.summary().await;
    let courses = state.service.course_breakdown().await;
    let inner_content = render_dashboard(&summary, &courses);

    let user = state.service.sidebar_user();
    axum::response::Html(crate::page_response(&headers, DASHBOARD, DASHBOARD, &user, &inner_content))
}
