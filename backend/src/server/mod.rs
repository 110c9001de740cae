//! Server construction and dependency wiring.
//!
//! Startup mirrors the domain's initialisation protocol: seed the
//! catalogue, rebuild the availability index from the ledger, spawn the
//! expiry sweeper, then start serving and flip the readiness probe.

mod config;

pub use config::AppSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{
    AvailabilityService, BookingPorts, BookingService, DataSeeder, DomainError, ExpirySweeper,
    ExpirySweeperRuntime, MarkupPolicy, UnitEventRecorder, UnitService,
};
use backend::inbound::http::bookings::{cancel_booking, create_booking, get_booking, pay_booking};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::statistics::available_units;
use backend::inbound::http::units::{create_unit, get_unit, search_units};
use backend::outbound::memory::{
    InMemoryAvailabilityStore, InMemoryBookingRepository, InMemoryPaymentRepository,
    InMemorySweeperLease, InMemoryUnitEventRepository, InMemoryUnitRepository,
    InMemoryUserRepository,
};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(create_unit)
        .service(search_units)
        .service(get_unit)
        .service(create_booking)
        .service(get_booking)
        .service(cancel_booking)
        .service(pay_booking)
        .service(available_units);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

fn startup_error(context: &str, err: DomainError) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Construct an Actix HTTP server with all domain services wired up.
///
/// Seeds the catalogue, rebuilds the availability index, and spawns the
/// expiry sweeper before the listener starts. The readiness probe flips
/// only once all of that has succeeded.
///
/// # Errors
/// Propagates [`std::io::Error`] when startup initialisation or binding
/// the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    settings: AppSettings,
) -> std::io::Result<Server> {
    let markup = MarkupPolicy::new(settings.markup_percent)
        .map_err(|err| std::io::Error::other(format!("invalid markup configuration: {err}")))?;

    let units = Arc::new(InMemoryUnitRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let bookings = Arc::new(InMemoryBookingRepository::new());
    let payments = Arc::new(InMemoryPaymentRepository::new());
    let events = Arc::new(InMemoryUnitEventRepository::new());
    let index = Arc::new(InMemoryAvailabilityStore::new());
    let lease = Arc::new(InMemorySweeperLease::new());

    let availability = AvailabilityService::new(index, bookings.clone(), units.clone());
    let recorder = UnitEventRecorder::new(events);
    let clock = Arc::new(DefaultClock);

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
            recorder: recorder.clone(),
            clock: clock.clone(),
        },
        markup,
        settings.payment_window,
    );

    let seeder = DataSeeder::new(units, users, availability.clone(), recorder, clock);
    let seeded = seeder
        .run(&settings.seed)
        .await
        .map_err(|err| startup_error("startup seeding failed", err))?;
    info!(
        units_created = seeded.units_created,
        users_created = seeded.users_created,
        "startup seeding finished",
    );

    availability
        .rebuild(settings.refresh_index_on_startup)
        .await
        .map_err(|err| startup_error("availability index rebuild failed", err))?;

    let sweeper = ExpirySweeper::new(
        booking_service.clone(),
        lease,
        ExpirySweeperRuntime::default(),
        settings.sweeper.clone(),
    );
    tokio::spawn(async move {
        sweeper.run().await;
    });

    let http_state = web::Data::new(HttpState {
        units: unit_service,
        bookings: booking_service,
        availability,
        markup,
    });
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(settings.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
