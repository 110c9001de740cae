//! Identifier newtypes for ledger-owned records.
//!
//! Identities are UUIDs. Wrapping them keeps a unit id from being passed
//! where a booking id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type!(
    /// Stable identifier for a rentable [`Unit`](crate::domain::Unit).
    UnitId
);
id_type!(
    /// Stable identifier for a [`User`](crate::domain::User).
    UserId
);
id_type!(
    /// Stable identifier for a [`Booking`](crate::domain::Booking).
    BookingId
);
id_type!(
    /// Stable identifier for a [`Payment`](crate::domain::Payment).
    PaymentId
);
