//! HTTP inbound adapter exposing REST endpoints.

pub mod bookings;
pub mod error;
pub mod health;
pub mod state;
pub mod statistics;
#[cfg(test)]
pub mod test_utils;
pub mod units;
pub mod validation;

pub use error::ApiResult;
