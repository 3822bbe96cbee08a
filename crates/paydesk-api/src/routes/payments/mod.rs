//! Payment review routes
//!
//! Features:
//! - Search box plus course/year/status/method selectors
//! - Table fragment re-rendered on every filter change
//! - Confirm-before-apply status changes through a dialog fragment
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and fragment rendering

pub mod api;
pub mod page;

pub use api::{
    api_panel,
    api_payments,
    htmx_cancel,
    htmx_confirm,
    htmx_payments_list,
    htmx_select_status,
};

pub use page::page_manage_payments;
