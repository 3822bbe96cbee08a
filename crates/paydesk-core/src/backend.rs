//! Payments backend abstraction
//!
//! The console only needs two operations from the backend: list every
//! payment and set one payment's status. Both take the bearer token read
//! from the session at call time.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CoreError;
use crate::models::Payment;
use crate::types::PaymentStatus;

/// Backend reference type
pub type BackendRef = Arc<dyn PaymentsBackend>;

/// Trait for payments backends
#[async_trait]
pub trait PaymentsBackend: Send + Sync {
    /// `GET /payments`
    async fn list_payments(&self, token: Option<&str>) -> Result<Vec<Payment>, CoreError>;

    /// `PUT /payments/{id}` with `{"status": ...}`
    async fn update_status(
        &self,
        token: Option<&str>,
        id: &str,
        status: PaymentStatus,
    ) -> Result<(), CoreError>;
}
