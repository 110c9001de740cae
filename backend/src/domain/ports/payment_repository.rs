//! Port for payment record persistence.

use async_trait::async_trait;

use crate::domain::{DomainError, Payment};

use super::define_port_error;

define_port_error! {
    /// Errors raised by payment repository adapters.
    pub enum PaymentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            connection, "payment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            query, "payment repository query failed: {message}",
    }
}

impl From<PaymentRepositoryError> for DomainError {
    fn from(err: PaymentRepositoryError) -> Self {
        DomainError::service_unavailable(err.to_string())
    }
}

/// Port for recording settled charges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persist a payment record.
    async fn save(&self, payment: &Payment) -> Result<(), PaymentRepositoryError>;
}
