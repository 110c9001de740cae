//! Port for unit catalogue persistence.

use async_trait::async_trait;

use crate::domain::{DomainError, Unit, UnitFilter, UnitId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by unit repository adapters.
    pub enum UnitRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            connection, "unit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            query, "unit repository query failed: {message}",
    }
}

impl From<UnitRepositoryError> for DomainError {
    fn from(err: UnitRepositoryError) -> Self {
        DomainError::service_unavailable(err.to_string())
    }
}

/// Port for writing and querying the unit catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitRepository: Send + Sync {
    /// Persist a unit.
    async fn save(&self, unit: &Unit) -> Result<(), UnitRepositoryError>;

    /// Find a unit by id.
    async fn find_by_id(&self, unit_id: &UnitId) -> Result<Option<Unit>, UnitRepositoryError>;

    /// Total number of units in the catalogue.
    async fn count(&self) -> Result<u64, UnitRepositoryError>;

    /// Number of units carrying the given description marker.
    async fn count_by_description(&self, description: &str) -> Result<u64, UnitRepositoryError>;

    /// Units matching `filter`, ordered by creation time.
    async fn find_matching(&self, filter: &UnitFilter) -> Result<Vec<Unit>, UnitRepositoryError>;
}
