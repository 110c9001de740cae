//! In-memory adapters for every domain port.
//!
//! State lives behind standard mutexes; critical sections are short and
//! never await, so they cannot deadlock the async executor.

mod availability;
mod bookings;
mod lease;
mod payments;
mod unit_events;
mod units;
mod users;

pub use availability::InMemoryAvailabilityStore;
pub use bookings::InMemoryBookingRepository;
pub use lease::InMemorySweeperLease;
pub use payments::InMemoryPaymentRepository;
pub use unit_events::InMemoryUnitEventRepository;
pub use units::InMemoryUnitRepository;
pub use users::InMemoryUserRepository;
