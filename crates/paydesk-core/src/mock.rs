//! In-memory backend with configurable failures, for tests and demos

use async_trait::async_trait;
use std::sync::Mutex;

use crate::backend::PaymentsBackend;
use crate::error::CoreError;
use crate::models::Payment;
use crate::types::PaymentStatus;

/// A call observed by [`MockBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    List { token: Option<String> },
    Update { token: Option<String>, id: String, status: PaymentStatus },
}

/// Backend serving a fixed list from memory
#[derive(Debug, Default)]
pub struct MockBackend {
    payments: Mutex<Vec<Payment>>,
    fail_list: bool,
    fail_update: bool,
    calls: Mutex<Vec<MockCall>>,
}

impl MockBackend {
    pub fn new(payments: Vec<Payment>) -> Self {
        Self {
            payments: Mutex::new(payments),
            ..Default::default()
        }
    }

    /// Make every list request fail
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Make every update request fail
    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: MockCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl PaymentsBackend for MockBackend {
    async fn list_payments(&self, token: Option<&str>) -> Result<Vec<Payment>, CoreError> {
        self.record(MockCall::List { token: token.map(str::to_string) });
        if self.fail_list {
            return Err(CoreError::FetchFailed { message: "mock list failure".to_string() });
        }
        self.payments
            .lock()
            .map(|p| p.clone())
            .map_err(|e| CoreError::InternalError { message: e.to_string() })
    }

    async fn update_status(
        &self,
        token: Option<&str>,
        id: &str,
        status: PaymentStatus,
    ) -> Result<(), CoreError> {
        self.record(MockCall::Update {
            token: token.map(str::to_string),
            id: id.to_string(),
            status,
        });
        if self.fail_update {
            return Err(CoreError::UpdateFailed {
                id: id.to_string(),
                message: "mock update failure".to_string(),
            });
        }
        let mut payments = self
            .payments
            .lock()
            .map_err(|e| CoreError::InternalError { message: e.to_string() })?;
        match payments.iter_mut().find(|p| p.id == id) {
            Some(payment) => {
                payment.status = Some(status);
                Ok(())
            }
            None => Err(CoreError::UpdateFailed {
                id: id.to_string(),
                message: "404 Not Found".to_string(),
            }),
        }
    }
}
