//! Payment review service
//!
//! Couples the [`Panel`] state with a backend and a session store. The
//! panel lock is never held across a backend call, so the console stays
//! responsive while requests are in flight and concurrent confirmations
//! race at the network layer (last response wins).

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::BackendRef;
use crate::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::filter::FilterState;
use crate::models::Payment;
use crate::navigation::SidebarUser;
use crate::panel::{Completion, DialogState, Panel, PanelSnapshot};
use crate::reports::{course_breakdown, CourseBreakdown, StatusSummary};
use crate::session::SessionRef;
use crate::types::PaymentStatus;

/// Outcome of a confirm action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// No dialog for that change was open; nothing was sent
    NothingPending,
    /// Request sent; the completion was handled as described
    Sent(Completion),
}

/// Shared payment review service
#[derive(Clone)]
pub struct ReviewService {
    panel: Arc<RwLock<Panel>>,
    backend: BackendRef,
    session: SessionRef,
    logger: Arc<dyn ErrorLogger>,
}

impl ReviewService {
    pub fn new(backend: BackendRef, session: SessionRef) -> Self {
        Self {
            panel: Arc::new(RwLock::new(Panel::new())),
            backend,
            session,
            logger: Arc::new(DefaultErrorLogger),
        }
    }

    fn token(&self) -> Option<String> {
        self.session.load().bearer_token().map(str::to_string)
    }

    // ==================== Lifecycle ====================

    /// Mount the panel and fetch the payment list
    ///
    /// A failed fetch is logged and leaves the list empty.
    pub async fn mount(&self) -> Completion {
        let ticket = self.panel.write().await.begin_mount();
        let token = self.token();
        let result = self.backend.list_payments(token.as_deref()).await;

        let payments = match result {
            Ok(payments) => {
                log::info!("Fetched {} payments", payments.len());
                Some(payments)
            }
            Err(e) => {
                let context = ErrorContext::new("fetch_payments")
                    .with_request_id(paydesk_utils::generate_id());
                self.logger.log_error(&e, &context);
                None
            }
        };

        let completion = self.panel.write().await.finish_mount(ticket, payments);
        if completion == Completion::Stale {
            self.logger.log_debug("Discarded stale payment list", &ErrorContext::new("fetch_payments"));
        }
        completion
    }

    /// Mount only if the panel is not mounted yet
    pub async fn ensure_mounted(&self) {
        if !self.panel.read().await.is_mounted() {
            self.mount().await;
        }
    }

    /// Tear the panel down; in-flight completions will be discarded
    pub async fn unmount(&self) {
        self.panel.write().await.unmount();
    }

    /// Unmount and mount again, re-fetching the list
    pub async fn reload(&self) -> Completion {
        self.unmount().await;
        self.mount().await
    }

    // ==================== Status Change Workflow ====================

    /// Open the confirmation dialog for `id`; false when the id is unknown
    pub async fn select_status(&self, id: &str, status: PaymentStatus) -> bool {
        let found = self.panel.write().await.select_status(id, status);
        if found {
            log::debug!("Confirming status change of {} to {}", id, status);
        } else {
            self.logger.log_warning(
                &format!("Status selected for unknown payment {}", id),
                &ErrorContext::new("select_status"),
            );
        }
        found
    }

    /// Close the dialog for setting `id` to `status` without changing anything
    ///
    /// A dialog opened since for a different change is left open.
    pub async fn cancel(&self, id: &str, status: PaymentStatus) -> bool {
        let mut panel = self.panel.write().await;
        if !panel.is_pending(id, status) {
            log::debug!("Ignoring cancel of {} to {}: not pending", id, status);
            return false;
        }
        panel.cancel();
        log::debug!("Cancelled status change of {}", id);
        true
    }

    /// Send the pending change of `id` to `status` and apply it locally on success
    ///
    /// The dialog is closed whether or not the request succeeds. Nothing is
    /// sent when the open dialog is for a different change.
    pub async fn confirm(&self, id: &str, status: PaymentStatus) -> ConfirmOutcome {
        let ticket = match self.panel.write().await.begin_confirm(id, status) {
            Some(ticket) => ticket,
            None => {
                log::debug!("Ignoring confirm of {} to {}: not pending", id, status);
                return ConfirmOutcome::NothingPending;
            }
        };

        let token = self.token();
        let result = self
            .backend
            .update_status(token.as_deref(), &ticket.payment_id, ticket.status)
            .await;

        if let Err(ref e) = result {
            let context = ErrorContext::new("update_payment_status")
                .with_request_id(paydesk_utils::generate_id())
                .with_data("payment_id", serde_json::json!(ticket.payment_id))
                .with_data("status", serde_json::json!(ticket.status));
            self.logger.log_error(e, &context);
        }

        let completion = self.panel.write().await.finish_confirm(&ticket, result.is_ok());
        match completion {
            Completion::Applied => {
                log::info!("Payment {} set to {}", ticket.payment_id, ticket.status)
            }
            Completion::Stale => self.logger.log_debug(
                &format!("Discarded stale update of {}", ticket.payment_id),
                &ErrorContext::new("update_payment_status"),
            ),
            Completion::Failed => {}
        }
        ConfirmOutcome::Sent(completion)
    }

    // ==================== Queries ====================

    /// Filtered copy of the list, in list order
    pub async fn filtered(&self, filter: &FilterState) -> Vec<Payment> {
        self.panel
            .read()
            .await
            .filtered(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn dialog(&self) -> DialogState {
        self.panel.read().await.dialog().clone()
    }

    pub async fn snapshot(&self) -> PanelSnapshot {
        self.panel.read().await.snapshot()
    }

    pub async fn summary(&self) -> StatusSummary {
        StatusSummary::from_payments(self.panel.read().await.payments())
    }

    pub async fn course_breakdown(&self) -> Vec<CourseBreakdown> {
        course_breakdown(self.panel.read().await.payments())
    }

    /// Sidebar identity from the current session
    pub fn sidebar_user(&self) -> SidebarUser {
        SidebarUser::from_session(&self.session.load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBackend, MockCall};
    use crate::models::UserSummary;
    use crate::session::{MemorySessionStore, Session};

    fn ana() -> Payment {
        Payment::new("1", PaymentStatus::Unpaid).with_user(UserSummary {
            name: Some("Ana".to_string()),
            ..Default::default()
        })
    }

    fn service(backend: MockBackend, token: Option<&str>) -> (ReviewService, Arc<MockBackend>, Arc<MemorySessionStore>) {
        let backend = Arc::new(backend);
        let session = Arc::new(MemorySessionStore::new(Session {
            token: token.map(str::to_string),
            ..Default::default()
        }));
        (ReviewService::new(backend.clone(), session.clone()), backend, session)
    }

    #[tokio::test]
    async fn test_select_confirm_updates_record() {
        let (svc, backend, _) = service(MockBackend::new(vec![ana()]), Some("tok"));
        assert_eq!(svc.mount().await, Completion::Applied);

        assert!(svc.select_status("1", PaymentStatus::Paid).await);
        match svc.dialog().await {
            DialogState::Confirming(pending) => {
                assert_eq!(pending.payment.user_name(), Some("Ana"));
                assert_eq!(pending.status, PaymentStatus::Paid);
            }
            DialogState::Idle => panic!("dialog should be open"),
        }

        assert_eq!(svc.confirm("1", PaymentStatus::Paid).await, ConfirmOutcome::Sent(Completion::Applied));
        assert_eq!(svc.dialog().await, DialogState::Idle);

        let all = svc.filtered(&FilterState::default()).await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, Some(PaymentStatus::Paid));

        assert_eq!(
            backend.calls()[1],
            MockCall::Update {
                token: Some("tok".to_string()),
                id: "1".to_string(),
                status: PaymentStatus::Paid,
            }
        );
    }

    #[tokio::test]
    async fn test_cancel_sends_nothing() {
        let (svc, backend, _) = service(MockBackend::new(vec![ana()]), None);
        svc.mount().await;
        let before = svc.filtered(&FilterState::default()).await;

        svc.select_status("1", PaymentStatus::Paid).await;
        assert!(svc.cancel("1", PaymentStatus::Paid).await);

        assert_eq!(svc.dialog().await, DialogState::Idle);
        assert_eq!(svc.filtered(&FilterState::default()).await, before);
        assert_eq!(backend.calls().len(), 1);
        assert_eq!(svc.confirm("1", PaymentStatus::Paid).await, ConfirmOutcome::NothingPending);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_status_and_closes_dialog() {
        let (svc, _, _) = service(MockBackend::new(vec![ana()]).failing_update(), Some("tok"));
        svc.mount().await;
        svc.select_status("1", PaymentStatus::Paid).await;

        assert_eq!(svc.confirm("1", PaymentStatus::Paid).await, ConfirmOutcome::Sent(Completion::Failed));
        assert_eq!(svc.dialog().await, DialogState::Idle);
        let all = svc.filtered(&FilterState::default()).await;
        assert_eq!(all[0].status, Some(PaymentStatus::Unpaid));
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_empty_list() {
        let (svc, _, _) = service(MockBackend::new(vec![ana()]).failing_list(), None);
        assert_eq!(svc.mount().await, Completion::Failed);
        let snapshot = svc.snapshot().await;
        assert!(snapshot.mounted);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.payment_count, 0);
    }

    #[tokio::test]
    async fn test_token_is_read_fresh_per_request() {
        let (svc, backend, session) = service(MockBackend::new(vec![ana()]), Some("old"));
        svc.mount().await;
        session.set(Session { token: Some("new".to_string()), ..Default::default() });
        svc.select_status("1", PaymentStatus::Pending).await;
        svc.confirm("1", PaymentStatus::Pending).await;

        let calls = backend.calls();
        assert_eq!(calls[0], MockCall::List { token: Some("old".to_string()) });
        assert!(matches!(&calls[1], MockCall::Update { token: Some(t), .. } if t == "new"));
    }

    #[tokio::test]
    async fn test_confirm_and_cancel_only_act_on_the_shown_change() {
        let payments = vec![ana(), Payment::new("2", PaymentStatus::Pending)];
        let (svc, backend, _) = service(MockBackend::new(payments), Some("tok"));
        svc.mount().await;

        svc.select_status("1", PaymentStatus::Paid).await;
        svc.select_status("2", PaymentStatus::Unpaid).await;

        assert!(!svc.cancel("1", PaymentStatus::Paid).await);
        assert_eq!(svc.confirm("1", PaymentStatus::Paid).await, ConfirmOutcome::NothingPending);
        assert!(svc.dialog().await.is_open());
        assert_eq!(backend.calls().len(), 1);

        assert_eq!(
            svc.confirm("2", PaymentStatus::Unpaid).await,
            ConfirmOutcome::Sent(Completion::Applied)
        );
        let all = svc.filtered(&FilterState::default()).await;
        assert_eq!(all[0].status, Some(PaymentStatus::Unpaid));
        assert_eq!(all[1].status, Some(PaymentStatus::Unpaid));
        assert!(matches!(&backend.calls()[1], MockCall::Update { id, .. } if id == "2"));
    }

    #[tokio::test]
    async fn test_ensure_mounted_fetches_once() {
        let (svc, backend, _) = service(MockBackend::new(vec![ana()]), None);
        svc.ensure_mounted().await;
        svc.ensure_mounted().await;
        assert_eq!(backend.calls().len(), 1);

        svc.reload().await;
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_summary_and_sidebar_user() {
        let (svc, _, _) = service(MockBackend::new(vec![ana(), Payment::new("2", PaymentStatus::Paid)]), None);
        svc.mount().await;
        let summary = svc.summary().await;
        assert_eq!(summary.total, 2);
        assert_eq!(summary.paid, 1);
        assert_eq!(svc.sidebar_user().name, "Admin User");
    }
}
