//! In-memory payment record store.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::Payment;
use crate::domain::ports::{PaymentRepository, PaymentRepositoryError};

/// Payment records held in process memory.
#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: Mutex<Vec<Payment>>,
}

impl InMemoryPaymentRepository {
    /// Build an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded payment, in insertion order.
    pub fn recorded(&self) -> Vec<Payment> {
        self.payments.lock().expect("payment store poisoned").clone()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), PaymentRepositoryError> {
        let mut payments = self.payments.lock().expect("payment store poisoned");
        payments.push(payment.clone());
        Ok(())
    }
}
