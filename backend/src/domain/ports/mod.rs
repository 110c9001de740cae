//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (databases, caches, lease stores). Each trait exposes strongly typed
//! errors so adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod availability_store;
mod booking_repository;
mod payment_repository;
mod sweeper_lease;
mod unit_event_repository;
mod unit_repository;
mod user_repository;

#[cfg(test)]
pub use availability_store::MockAvailabilityStore;
pub use availability_store::{AvailabilityStore, AvailabilityStoreError};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
pub use payment_repository::{PaymentRepository, PaymentRepositoryError};
#[cfg(test)]
pub use sweeper_lease::MockSweeperLease;
pub use sweeper_lease::{LeaseToken, SweeperLease, SweeperLeaseError};
#[cfg(test)]
pub use unit_event_repository::MockUnitEventRepository;
pub use unit_event_repository::{UnitEventRepository, UnitEventRepositoryError};
#[cfg(test)]
pub use unit_repository::MockUnitRepository;
pub use unit_repository::{UnitRepository, UnitRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
