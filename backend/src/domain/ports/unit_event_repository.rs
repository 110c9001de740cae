//! Port for the unit audit trail.

use async_trait::async_trait;

use crate::domain::UnitEvent;

use super::define_port_error;

define_port_error! {
    /// Errors raised by audit trail adapters.
    pub enum UnitEventRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            connection, "unit event repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            query, "unit event repository query failed: {message}",
    }
}

/// Port for appending audit events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitEventRepository: Send + Sync {
    /// Append an event to the trail.
    async fn save(&self, event: &UnitEvent) -> Result<(), UnitEventRepositoryError>;
}
