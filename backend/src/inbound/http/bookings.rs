//! Booking lifecycle HTTP handlers.
//!
//! ```text
//! POST   /api/v1/bookings
//! GET    /api/v1/bookings/{bookingId}
//! DELETE /api/v1/bookings/{bookingId}
//! POST   /api/v1/bookings/{bookingId}/pay
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Booking, BookingDraft, BookingStatus, Payment, PaymentStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date_range, parse_uuid};

/// Request payload for placing a booking.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequestBody {
    #[schema(format = "uuid")]
    pub unit_id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    /// First night of the stay, `YYYY-MM-DD`.
    pub check_in_date: String,
    /// Departure date, `YYYY-MM-DD`. Not occupied.
    pub check_out_date: String,
}

/// Booking representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub unit_id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub status: BookingStatus,
    #[schema(value_type = String, example = "110.00")]
    pub total_cost: Decimal,
    #[schema(format = "date-time")]
    pub created_at: String,
    /// Payment deadline; present only while the booking is pending.
    #[schema(format = "date-time")]
    pub expires_at: Option<String>,
}

/// Charge recorded when a booking is paid.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub booking_id: String,
    pub status: PaymentStatus,
    #[schema(value_type = String, example = "110.00")]
    pub amount: Decimal,
    #[schema(format = "date-time")]
    pub paid_at: String,
}

impl From<Payment> for PaymentResponseBody {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            booking_id: payment.booking_id.to_string(),
            status: payment.status,
            amount: payment.amount,
            paid_at: payment.created_at.to_rfc3339(),
        }
    }
}

impl From<Booking> for BookingResponseBody {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            unit_id: booking.unit_id.to_string(),
            user_id: booking.user_id.to_string(),
            check_in_date: booking.date_range.check_in().format("%Y-%m-%d").to_string(),
            check_out_date: booking.date_range.check_out().format("%Y-%m-%d").to_string(),
            status: booking.status,
            total_cost: booking.total_cost,
            created_at: booking.created_at.to_rfc3339(),
            expires_at: booking.expires_at.map(|deadline| deadline.to_rfc3339()),
        }
    }
}

/// Place a booking, holding the unit until payment or expiry.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequestBody,
    responses(
        (status = 201, description = "Booking placed", body = BookingResponseBody),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 404, description = "Unit or user not found", body = crate::domain::DomainError),
        (status = 409, description = "Unit unavailable for the chosen dates", body = crate::domain::DomainError),
        (status = 503, description = "Service unavailable", body = crate::domain::DomainError)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookingRequestBody>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let unit_id = parse_uuid(payload.unit_id, FieldName::new("unitId"))?;
    let user_id = parse_uuid(payload.user_id, FieldName::new("userId"))?;
    let date_range = parse_date_range(payload.check_in_date, payload.check_out_date)?;

    let booking = state
        .bookings
        .create(BookingDraft {
            unit_id: unit_id.into(),
            user_id: user_id.into(),
            date_range,
        })
        .await?;
    Ok(HttpResponse::Created().json(BookingResponseBody::from(booking)))
}

/// Fetch a single booking.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{bookingId}",
    params(("bookingId" = uuid::Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking found", body = BookingResponseBody),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 404, description = "Booking not found", body = crate::domain::DomainError)
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{bookingId}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let booking_id = parse_uuid(path.into_inner(), FieldName::new("bookingId"))?;
    let booking = state.bookings.get(booking_id.into()).await?;
    Ok(web::Json(BookingResponseBody::from(booking)))
}

/// Cancel a booking and release its dates.
///
/// Cancelling an already-terminal booking is a no-op and returns the
/// stored state unchanged.
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{bookingId}",
    params(("bookingId" = uuid::Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking cancelled or already terminal", body = BookingResponseBody),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 404, description = "Booking not found", body = crate::domain::DomainError),
        (status = 409, description = "Booking was modified concurrently", body = crate::domain::DomainError)
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[delete("/bookings/{bookingId}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let booking_id = parse_uuid(path.into_inner(), FieldName::new("bookingId"))?;
    let booking = state.bookings.cancel(booking_id.into()).await?;
    Ok(web::Json(BookingResponseBody::from(booking)))
}

/// Pay for a pending booking, confirming it and returning the charge.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{bookingId}/pay",
    params(("bookingId" = uuid::Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Payment captured and booking confirmed", body = PaymentResponseBody),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 404, description = "Booking not found", body = crate::domain::DomainError),
        (status = 409, description = "Booking is not payable", body = crate::domain::DomainError)
    ),
    tags = ["bookings"],
    operation_id = "payBooking"
)]
#[post("/bookings/{bookingId}/pay")]
pub async fn pay_booking(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PaymentResponseBody>> {
    let booking_id = parse_uuid(path.into_inner(), FieldName::new("bookingId"))?;
    let payment = state.bookings.pay(booking_id.into()).await?;
    Ok(web::Json(PaymentResponseBody::from(payment)))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
