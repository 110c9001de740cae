//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer plus the
//! request and response schemas they exchange. The generated document backs
//! Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{DomainError, ErrorCode};
use crate::inbound::http::bookings::{
    BookingResponseBody, CreateBookingRequestBody, PaymentResponseBody,
};
use crate::inbound::http::statistics::AvailableUnitsResponseBody;
use crate::inbound::http::units::{
    CreateUnitRequestBody, SearchUnitsResponseBody, UnitResponseBody,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Booking backend API",
        description = "HTTP interface for unit bookings, availability, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::units::create_unit,
        crate::inbound::http::units::get_unit,
        crate::inbound::http::units::search_units,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::cancel_booking,
        crate::inbound::http::bookings::pay_booking,
        crate::inbound::http::statistics::available_units,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        CreateUnitRequestBody,
        UnitResponseBody,
        SearchUnitsResponseBody,
        CreateBookingRequestBody,
        BookingResponseBody,
        PaymentResponseBody,
        AvailableUnitsResponseBody,
    )),
    tags(
        (name = "units", description = "Unit catalogue and search"),
        (name = "bookings", description = "Booking lifecycle operations"),
        (name = "statistics", description = "Availability statistics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
