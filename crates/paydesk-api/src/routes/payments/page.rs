//! Payment review page rendering
//!
//! Endpoints:
//! - page_manage_payments: Review panel with filters, table and dialog containers
//!
//! Helper functions:
//! - render_filter_bar: Search box and the four selectors
//! - render_table: Payment table (HTML fragment)
//! - render_dialog: Confirmation dialog (HTML fragment)

use crate::AppState;
use paydesk_core::navigation::MANAGE_PAYMENTS;
use paydesk_core::{
    CourseFilter, DialogState, FilterOption, FilterState, MethodFilter, Payment, PaymentStatus,
    StatusFilter, YearFilter,
};
use paydesk_utils::escape_html;

/// Fires after a confirm or cancel so the table re-renders
pub const PAYMENTS_CHANGED: &str = "payments-changed";

/// Form field carrying the chosen status; distinct from the `status` filter
pub const NEW_STATUS: &str = "new_status";

/// Form field naming the payment a dialog button acts on
pub const PAYMENT_ID: &str = "payment_id";

/// Manage Payments page
pub async fn page_manage_payments(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    state.service.ensure_mounted().await;
    let dialog = state.service.dialog().await;

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Manage Payments</h2>
            <button hx-post='/api/reload' hx-swap='none' hx-on::after-request="htmx.trigger(document.body, '{changed}')"
                class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Reload</button>
        </div>
        {filters}
        <div id='payments-table' hx-get='/payments/list' hx-trigger='load, {changed} from:body' hx-include='#payment-filters' hx-disinherit='hx-include'
            class='bg-white rounded-xl shadow-sm p-4 mt-4 overflow-x-auto max-h-[500px] overflow-y-auto'>
            <p class='text-gray-500 text-center'>Loading...</p>
        </div>
        <div id='status-dialog'>{dialog}</div>"#,
        changed = PAYMENTS_CHANGED,
        filters = render_filter_bar(&FilterState::default()),
        dialog = render_dialog(&dialog),
    );

    let user = state.service.sidebar_user();
    axum::response::Html(crate::page_response(&headers, MANAGE_PAYMENTS, MANAGE_PAYMENTS, &user, &inner_content))
}

fn render_select<T: FilterOption>(name: &str, label: &str, selected: T) -> String {
    let options: String = T::options()
        .into_iter()
        .map(|option| {
            format!(
                "<option value='{}'{}>{}</option>",
                escape_html(&option.value()),
                if option == selected { " selected" } else { "" },
                escape_html(&option.label())
            )
        })
        .collect();
    format!(
        r#"<div class='flex flex-col'>
            <label class='text-sm font-medium mb-1' for='filter-{name}'>{label}</label>
            <select id='filter-{name}' name='{name}' hx-get='/payments/list' hx-target='#payments-table' hx-trigger='change' hx-include='#payment-filters'
                class='w-[150px] h-10 px-2 border rounded-lg text-sm'>{options}</select>
        </div>"#,
        name = name,
        label = label,
        options = options
    )
}

/// Search box and selectors, wrapped in the `#payment-filters` form
pub fn render_filter_bar(filter: &FilterState) -> String {
    format!(
        r#"<form id='payment-filters' onsubmit='return false' class='flex flex-col gap-2'>
            <div class='flex flex-col w-full'>
                <label class='text-sm font-medium mb-1' for='filter-q'>Search</label>
                <input id='filter-q' type='text' name='q' value='{search}' placeholder='Search...'
                    hx-get='/payments/list' hx-target='#payments-table' hx-trigger='keyup changed delay:300ms, search' hx-include='#payment-filters'
                    class='min-w-[150px] h-10 px-3 border rounded-lg text-sm'>
            </div>
            <div class='flex flex-wrap gap-4 items-end'>{course}{year}{status}{method}</div>
        </form>"#,
        search = escape_html(&filter.search),
        course = render_select::<CourseFilter>("course", "Course", filter.course),
        year = render_select::<YearFilter>("year", "Year", filter.year),
        status = render_select::<StatusFilter>("status", "Status", filter.status),
        method = render_select::<MethodFilter>("method", "Payment Method", filter.method),
    )
}

fn render_status_cell(payment: &Payment) -> String {
    let mut options = String::new();
    if payment.status.is_none() {
        options.push_str("<option value='' selected disabled>Select status</option>");
    }
    for status in PaymentStatus::ALL {
        options.push_str(&format!(
            "<option value='{0}'{1}>{0}</option>",
            status,
            if payment.status == Some(status) { " selected" } else { "" }
        ));
    }
    format!(
        r#"<select name='{}' hx-post='/payments/{}/status' hx-target='#status-dialog' hx-trigger='change' hx-include='this'
            class='w-[120px] h-10 px-2 border rounded-lg text-xs font-semibold {}'>{}</select>"#,
        NEW_STATUS,
        escape_html(&payment.id),
        payment.status_tone().css_class(),
        options
    )
}

/// Payment table; a single "No results found." row when empty
pub fn render_table(payments: &[Payment]) -> String {
    let rows: String = if payments.is_empty() {
        "<tr><td colspan='8' class='text-center py-4 text-gray-500 text-base'>No results found.</td></tr>".to_string()
    } else {
        payments
            .iter()
            .map(|p| {
                format!(
                    r#"<tr class='border-b hover:bg-gray-50' data-payment-id='{}'>
                <td class='px-3 py-2'>{}</td>
                <td class='hidden md:table-cell px-3 py-2'>{}</td>
                <td class='hidden md:table-cell px-3 py-2'>{}</td>
                <td class='hidden md:table-cell px-3 py-2 text-center'>{}</td>
                <td class='hidden md:table-cell px-3 py-2 text-center'>{}</td>
                <td class='px-3 py-2 text-center'>{}</td>
                <td class='px-3 py-2 text-center'>{}</td>
                <td class='px-3 py-2 text-center'>{}</td>
            </tr>"#,
                    escape_html(&p.id),
                    escape_html(p.user_id_label()),
                    escape_html(p.user_name().unwrap_or_default()),
                    escape_html(p.user_email().unwrap_or_default()),
                    escape_html(p.user_course().unwrap_or_default()),
                    escape_html(&p.user_year().unwrap_or_default()),
                    escape_html(&p.method_label()),
                    escape_html(p.reference_label()),
                    render_status_cell(p)
                )
            })
            .collect()
    };

    format!(
        r#"<table class='w-full table-auto'>
        <thead><tr class='text-left text-sm whitespace-nowrap border-b'>
            <th class='px-3 py-2'>ID</th>
            <th class='hidden md:table-cell px-3 py-2'>Full Name</th>
            <th class='hidden md:table-cell px-3 py-2'>Email</th>
            <th class='hidden md:table-cell px-3 py-2 text-center'>Course</th>
            <th class='hidden md:table-cell px-3 py-2 text-center'>Year</th>
            <th class='px-3 py-2 text-center'>Payment Method</th>
            <th class='px-3 py-2 text-center'>Reference Code</th>
            <th class='px-3 py-2 text-center'>Status</th>
        </tr></thead>
        <tbody class='text-xs'>{}</tbody>
    </table>"#,
        rows
    )
}

/// Confirmation dialog; empty when idle
pub fn render_dialog(dialog: &DialogState) -> String {
    let pending = match dialog {
        DialogState::Idle => return String::new(),
        DialogState::Confirming(pending) => pending,
    };

    let vals = serde_json::json!({
        PAYMENT_ID: pending.payment.id,
        NEW_STATUS: pending.status,
    });

    format!(
        r#"<div data-dialog class='fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center' role='dialog' aria-modal='true'>
    <div class='bg-white rounded-xl shadow-2xl w-full max-w-md p-6'>
        <h3 class='text-lg font-semibold mb-2'>Confirm Status Change</h3>
        <p class='text-sm text-gray-600'>Are you sure you want to set <span class='font-semibold'>{name}</span> to <span class='font-semibold'>{status}</span> status?</p>
        <div class='flex gap-2 justify-end mt-6'>
            <button hx-post='/payments/cancel' hx-target='#status-dialog' hx-vals='{vals}'
                class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Cancel</button>
            <button hx-post='/payments/confirm' hx-target='#status-dialog' hx-vals='{vals}'
                hx-on::before-request="this.closest('[data-dialog]').classList.add('hidden')"
                class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Confirm</button>
        </div>
    </div>
</div>"#,
        name = escape_html(pending.payment.user_name().unwrap_or_default()),
        status = pending.status,
        vals = escape_html(&vals.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_payments;
    use paydesk_core::PendingChange;

    #[test]
    fn test_render_table_rows_and_placeholders() {
        let html = render_table(&sample_payments());
        assert!(html.contains("<td class='px-3 py-2'>2021-0001</td>"));
        // second payment: no user id, raw GCash method, has reference code
        assert!(html.contains("<td class='px-3 py-2'>N/A</td>"));
        assert!(html.contains(">GCash</td>"));
        assert!(html.contains(">GC-991</td>"));
        assert!(html.contains("border-red-600 text-red-600"));
        assert!(html.contains("border-green-600 text-green-600"));
        assert!(!html.contains("No results found."));
    }

    #[test]
    fn test_render_empty_table() {
        let html = render_table(&[]);
        assert!(html.contains("No results found."));
        assert_eq!(html.matches("<tr").count(), 2);
    }

    #[test]
    fn test_status_cell_without_status_is_neutral() {
        let mut payment = Payment::new("p9", PaymentStatus::Paid);
        payment.status = None;
        let html = render_table(&[payment]);
        assert!(html.contains("Select status"));
        assert!(html.contains("border-gray-500 text-gray-500"));
    }

    #[test]
    fn test_render_dialog() {
        assert_eq!(render_dialog(&DialogState::Idle), "");

        let payment = sample_payments().remove(0);
        let html = render_dialog(&DialogState::Confirming(PendingChange {
            payment,
            status: PaymentStatus::Paid,
        }));
        assert!(html.contains("Confirm Status Change"));
        assert!(html.contains("Are you sure you want to set <span class='font-semibold'>Ana</span> to <span class='font-semibold'>Paid</span> status?"));
        assert!(html.contains(">Cancel<"));
        assert!(html.contains(">Confirm<"));
        // both buttons name the change they act on
        assert_eq!(html.matches("hx-vals='{").count(), 2);
        assert_eq!(html.matches("&quot;payment_id&quot;:&quot;p1&quot;").count(), 2);
        assert_eq!(html.matches("&quot;new_status&quot;:&quot;Paid&quot;").count(), 2);
    }

    #[test]
    fn test_row_select_does_not_send_filters() {
        let html = render_table(&sample_payments());
        assert!(html.contains("<select name='new_status' hx-post='/payments/p1/status' hx-target='#status-dialog' hx-trigger='change' hx-include='this'"));
        assert!(!html.contains("name='status'"));
    }

    #[test]
    fn test_filter_bar_marks_selection() {
        let filter = FilterState::from_params(Some("a'b"), Some("BSIT"), Some("3"), None, Some("GCash"));
        let html = render_filter_bar(&filter);
        assert!(html.contains("value='a&#39;b'"));
        assert!(html.contains("<option value='BSIT' selected>BSIT</option>"));
        assert!(html.contains("<option value='3' selected>3rd</option>"));
        assert!(html.contains("<option value='GCash' selected>Digital</option>"));
        assert!(html.contains("<option value='All' selected>All</option>"));
    }
}
