//! Dashboard routes - payment totals per status
//!
//! Structure:
//! - api.rs: Summary JSON API
//! - page.rs: Dashboard page

pub mod api;
pub mod page;

pub use api::api_summary;
pub use page::page_dashboard;
