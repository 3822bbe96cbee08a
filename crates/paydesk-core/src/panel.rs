//! Payment review panel state
//!
//! The panel owns the loaded payment list and the status-change dialog.
//! Network work happens outside the panel: callers take a ticket, release
//! the panel, await the backend, then hand the result back. Tickets carry
//! the mount generation so results arriving after a re-mount are dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filter::{filter_payments, FilterState};
use crate::models::Payment;
use crate::types::PaymentStatus;

/// Status change awaiting confirmation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingChange {
    /// Snapshot of the payment at selection time
    pub payment: Payment,
    /// Proposed status
    pub status: PaymentStatus,
}

/// Confirmation dialog state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DialogState {
    #[default]
    Idle,
    Confirming(PendingChange),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Confirming(_))
    }
}

/// Handle for an in-flight list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountTicket {
    generation: u64,
}

/// Handle for an in-flight status update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTicket {
    generation: u64,
    pub payment_id: String,
    pub status: PaymentStatus,
}

/// What happened to an async completion handed back to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    /// The result was applied to the list
    Applied,
    /// The request failed; the list is unchanged
    Failed,
    /// The panel was re-mounted or unmounted meanwhile; ignored
    Stale,
}

/// Serializable view of the panel for the JSON API
#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot {
    pub mounted: bool,
    pub loading: bool,
    pub generation: u64,
    pub payment_count: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub dialog: DialogState,
}

/// Payment review panel state
#[derive(Debug, Default)]
pub struct Panel {
    payments: Vec<Payment>,
    loading: bool,
    mounted: bool,
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
    dialog: DialogState,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Lifecycle ====================

    /// Start a new panel lifetime; the list is empty until the fetch lands
    pub fn begin_mount(&mut self) -> MountTicket {
        self.generation += 1;
        self.mounted = true;
        self.loading = true;
        self.payments.clear();
        self.loaded_at = None;
        self.dialog = DialogState::Idle;
        MountTicket { generation: self.generation }
    }

    /// Hand back the result of the fetch started by `begin_mount`
    ///
    /// `None` means the fetch failed: the list stays empty.
    pub fn finish_mount(&mut self, ticket: MountTicket, payments: Option<Vec<Payment>>) -> Completion {
        if ticket.generation != self.generation || !self.mounted {
            return Completion::Stale;
        }
        self.loading = false;
        match payments {
            Some(payments) => {
                self.payments = payments;
                self.loaded_at = Some(Utc::now());
                Completion::Applied
            }
            None => Completion::Failed,
        }
    }

    /// Tear the panel down; pending completions become stale
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
        self.loading = false;
        self.payments.clear();
        self.loaded_at = None;
        self.dialog = DialogState::Idle;
    }

    // ==================== Status Change Workflow ====================

    /// Operator picked `status` for payment `id`: open the dialog
    ///
    /// Replaces any pending selection. Returns false (state unchanged) when
    /// the id is not in the list.
    pub fn select_status(&mut self, id: &str, status: PaymentStatus) -> bool {
        match self.payment(id) {
            Some(payment) => {
                self.dialog = DialogState::Confirming(PendingChange {
                    payment: payment.clone(),
                    status,
                });
                true
            }
            None => false,
        }
    }

    /// Discard the pending selection and close the dialog
    pub fn cancel(&mut self) -> Option<PendingChange> {
        match std::mem::take(&mut self.dialog) {
            DialogState::Confirming(pending) => Some(pending),
            DialogState::Idle => None,
        }
    }

    /// Whether the open dialog is for setting `id` to `status`
    pub fn is_pending(&self, id: &str, status: PaymentStatus) -> bool {
        match &self.dialog {
            DialogState::Confirming(pending) => pending.payment.id == id && pending.status == status,
            DialogState::Idle => false,
        }
    }

    /// Close the dialog and return the update to send
    ///
    /// `id` and `status` are the change the operator saw in the dialog. When
    /// nothing is pending, or a different change has replaced it since, the
    /// dialog is left as is and `None` is returned.
    pub fn begin_confirm(&mut self, id: &str, status: PaymentStatus) -> Option<UpdateTicket> {
        if !self.is_pending(id, status) {
            return None;
        }
        self.cancel().map(|pending| UpdateTicket {
            generation: self.generation,
            payment_id: pending.payment.id,
            status: pending.status,
        })
    }

    /// Hand back the outcome of the update started by `begin_confirm`
    ///
    /// The local record changes only after a successful backend write.
    pub fn finish_confirm(&mut self, ticket: &UpdateTicket, succeeded: bool) -> Completion {
        if ticket.generation != self.generation || !self.mounted {
            return Completion::Stale;
        }
        if !succeeded {
            return Completion::Failed;
        }
        for payment in self.payments.iter_mut().filter(|p| p.id == ticket.payment_id) {
            payment.status = Some(ticket.status);
        }
        Completion::Applied
    }

    // ==================== Queries ====================

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn payment(&self, id: &str) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    /// Payments passing `filter`, in list order
    pub fn filtered(&self, filter: &FilterState) -> Vec<&Payment> {
        filter_payments(&self.payments, filter)
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            mounted: self.mounted,
            loading: self.loading,
            generation: self.generation,
            payment_count: self.payments.len(),
            loaded_at: self.loaded_at,
            dialog: self.dialog.clone(),
        }
    }
}
