//! Route modules for the API server
//!
//! - payments: Review panel page, table and dialog fragments, JSON API
//! - dashboard: Status totals page and summary API
//! - account_creation: Section placeholder
//! - navigation: Sidebar entries and user as JSON
//!
//! Modules with both kinds of endpoints follow a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX fragment endpoints
//! - page.rs: Full page rendering

pub mod account_creation;
pub mod dashboard;
pub mod navigation;
pub mod payments;
