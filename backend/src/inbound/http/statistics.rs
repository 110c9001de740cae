//! Availability statistics HTTP handlers.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use actix_web::{get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_date_range;

/// Query parameters for the available-units count.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvailableUnitsQuery {
    /// First night of the stay, `YYYY-MM-DD`.
    pub check_in_date: String,
    /// Departure date, `YYYY-MM-DD`.
    pub check_out_date: String,
}

/// Count of units free for the whole requested stay.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableUnitsResponseBody {
    pub available_units_count: u64,
}

/// Count units free for every night of the requested stay.
///
/// Served from the availability index; returns zero until the index has
/// been populated.
#[utoipa::path(
    get,
    path = "/api/v1/statistics/available-units",
    params(AvailableUnitsQuery),
    responses(
        (status = 200, description = "Available unit count", body = AvailableUnitsResponseBody),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 503, description = "Service unavailable", body = crate::domain::DomainError)
    ),
    tags = ["statistics"],
    operation_id = "availableUnitsCount"
)]
#[get("/statistics/available-units")]
pub async fn available_units(
    state: web::Data<HttpState>,
    query: web::Query<AvailableUnitsQuery>,
) -> ApiResult<web::Json<AvailableUnitsResponseBody>> {
    let query = query.into_inner();
    let range = parse_date_range(query.check_in_date, query.check_out_date)?;
    let available_units_count = state.availability.count_available(range).await?;
    Ok(web::Json(AvailableUnitsResponseBody {
        available_units_count,
    }))
}
