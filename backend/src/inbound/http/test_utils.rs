//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_web::{App, web};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::ports::{UnitRepository, UserRepository};
use crate::domain::{
    AvailabilityService, BookingPorts, BookingService, MarkupPolicy, Unit, UnitEventRecorder,
    UnitId, UnitService, User, UserId,
};
use crate::domain::{AccommodationType, DomainError};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryAvailabilityStore, InMemoryBookingRepository, InMemoryPaymentRepository,
    InMemoryUnitEventRepository, InMemoryUnitRepository, InMemoryUserRepository,
};

/// Fifteen minutes, matching the default payment window.
const PAYMENT_WINDOW_MINUTES: i64 = 15;

/// HTTP state over in-memory adapters, with handles for seeding fixtures.
pub(crate) struct TestBackend {
    pub state: HttpState,
    pub units: Arc<InMemoryUnitRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestBackend {
    pub(crate) fn new() -> Self {
        let units = Arc::new(InMemoryUnitRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let bookings = Arc::new(InMemoryBookingRepository::new());
        let payments = Arc::new(InMemoryPaymentRepository::new());
        let events = Arc::new(InMemoryUnitEventRepository::new());
        let index = Arc::new(InMemoryAvailabilityStore::new());

        let availability =
            AvailabilityService::new(index.clone(), bookings.clone(), units.clone());
        let recorder = UnitEventRecorder::new(events.clone());
        let clock = Arc::new(DefaultClock);
        let markup = MarkupPolicy::new(dec!(10)).expect("valid markup");

        let unit_service = UnitService::new(
            units.clone(),
            bookings.clone(),
            availability.clone(),
            recorder.clone(),
            clock.clone(),
        );
        let booking_service = BookingService::new(
            BookingPorts {
                bookings,
                units: units.clone(),
                users: users.clone(),
                payments,
                availability: availability.clone(),
                recorder,
                clock,
            },
            markup,
            Duration::minutes(PAYMENT_WINDOW_MINUTES),
        );

        Self {
            state: HttpState {
                units: unit_service,
                bookings: booking_service,
                availability,
                markup,
            },
            units,
            users,
        }
    }

    pub(crate) async fn seed_user(&self) -> Result<UserId, DomainError> {
        let user = User {
            id: UserId::random(),
            username: "guest".to_owned(),
            created_at: Utc::now(),
        };
        self.users.save(&user).await?;
        Ok(user.id)
    }

    pub(crate) async fn seed_unit(&self, base_cost: Decimal) -> Result<UnitId, DomainError> {
        let unit = Unit {
            id: UnitId::random(),
            number_of_rooms: 2,
            accommodation_type: AccommodationType::Flat,
            floor: 3,
            base_cost,
            description: None,
            created_at: Utc::now(),
        };
        self.units.save(&unit).await?;
        Ok(unit.id)
    }
}

/// Build an app exposing every versioned API route over `backend`'s state.
///
/// The returned app owns a clone of the state and captures nothing from
/// `backend`, so it outlives the borrow.
pub(crate) fn test_app(
    backend: &TestBackend,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(backend.state.clone()))
        .service(
            web::scope("/api/v1")
                .service(crate::inbound::http::units::create_unit)
                .service(crate::inbound::http::units::search_units)
                .service(crate::inbound::http::units::get_unit)
                .service(crate::inbound::http::bookings::create_booking)
                .service(crate::inbound::http::bookings::get_booking)
                .service(crate::inbound::http::bookings::cancel_booking)
                .service(crate::inbound::http::bookings::pay_booking)
                .service(crate::inbound::http::statistics::available_units),
        )
}
