//! Core payment review logic
//!
//! Holds the payment list model, filtering, the confirm-before-apply status
//! workflow and the navigation shell data. Transport lives behind
//! [`PaymentsBackend`]; the session behind [`SessionStore`].

pub mod backend;
pub mod error;
pub mod filter;
pub mod mock;
pub mod models;
pub mod navigation;
pub mod panel;
pub mod reports;
pub mod service;
pub mod session;
pub mod types;

pub use backend::{BackendRef, PaymentsBackend};
pub use error::{CoreError, CoreResult, ErrorContext, ErrorLogger, ErrorSeverity};
pub use filter::{filter_payments, matches_search, FilterState};
pub use models::{payment_method_label, Payment, UserSummary, YearValue, NOT_AVAILABLE};
pub use navigation::{navigation, NavIcon, NavItem, SidebarUser, NAV_ENTRIES, ORGANIZATION};
pub use panel::{Completion, DialogState, Panel, PanelSnapshot, PendingChange};
pub use reports::{course_breakdown, CourseBreakdown, StatusSummary};
pub use service::{ConfirmOutcome, ReviewService};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionRef, SessionStore};
pub use types::{
    CourseFilter, FilterOption, MethodFilter, PaymentStatus, StatusFilter, StatusTone, YearFilter,
};
