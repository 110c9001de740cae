//! Unit catalogue HTTP handlers.
//!
//! ```text
//! POST /api/v1/units
//! GET  /api/v1/units/search
//! GET  /api/v1/units/{unitId}
//! ```
//!
//! `search` must be registered before the id route or the literal segment
//! would be captured as a unit id.

use actix_web::{HttpResponse, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AccommodationType, MarkupPolicy, Unit, UnitDraft, UnitFilter, UnitSearch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date_range, parse_uuid};

const DEFAULT_PAGE_LIMIT: u64 = 20;
const MAX_PAGE_LIMIT: u64 = 100;

/// Request payload for adding a unit to the catalogue.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitRequestBody {
    pub number_of_rooms: u16,
    pub accommodation_type: AccommodationType,
    pub floor: u16,
    /// Nightly base cost before markup.
    #[schema(value_type = String, example = "100.00")]
    pub base_cost: Decimal,
    pub description: Option<String>,
}

/// Unit representation returned to clients.
///
/// `totalCost` already includes the system markup.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub number_of_rooms: u16,
    pub accommodation_type: AccommodationType,
    pub floor: u16,
    #[schema(value_type = String, example = "110.00")]
    pub total_cost: Decimal,
    pub description: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

/// Search criteria for available units.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchUnitsQuery {
    pub number_of_rooms: Option<u16>,
    pub accommodation_type: Option<AccommodationType>,
    pub floor: Option<u16>,
    #[param(value_type = Option<String>)]
    pub min_cost: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub max_cost: Option<Decimal>,
    /// Desired check-in date, `YYYY-MM-DD`.
    pub check_in_date: String,
    /// Desired check-out date, `YYYY-MM-DD`.
    pub check_out_date: String,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Windowed search result page.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchUnitsResponseBody {
    pub items: Vec<UnitResponseBody>,
    pub offset: u64,
    pub limit: u64,
}

pub(crate) fn unit_response(unit: Unit, markup: MarkupPolicy) -> UnitResponseBody {
    UnitResponseBody {
        id: unit.id.to_string(),
        number_of_rooms: unit.number_of_rooms,
        accommodation_type: unit.accommodation_type,
        floor: unit.floor,
        total_cost: markup.apply(unit.base_cost),
        description: unit.description,
        created_at: unit.created_at.to_rfc3339(),
    }
}

/// Add a unit to the catalogue.
#[utoipa::path(
    post,
    path = "/api/v1/units",
    request_body = CreateUnitRequestBody,
    responses(
        (status = 201, description = "Unit created", body = UnitResponseBody),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 503, description = "Service unavailable", body = crate::domain::DomainError)
    ),
    tags = ["units"],
    operation_id = "createUnit"
)]
#[post("/units")]
pub async fn create_unit(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUnitRequestBody>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let unit = state
        .units
        .create(UnitDraft {
            number_of_rooms: payload.number_of_rooms,
            accommodation_type: payload.accommodation_type,
            floor: payload.floor,
            base_cost: payload.base_cost,
            description: payload.description,
        })
        .await?;
    Ok(HttpResponse::Created().json(unit_response(unit, state.markup)))
}

/// Fetch a single unit.
#[utoipa::path(
    get,
    path = "/api/v1/units/{unitId}",
    params(("unitId" = uuid::Uuid, Path, description = "Unit identifier")),
    responses(
        (status = 200, description = "Unit found", body = UnitResponseBody),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 404, description = "Unit not found", body = crate::domain::DomainError)
    ),
    tags = ["units"],
    operation_id = "getUnit"
)]
#[get("/units/{unitId}")]
pub async fn get_unit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UnitResponseBody>> {
    let unit_id = parse_uuid(path.into_inner(), FieldName::new("unitId"))?;
    let unit = state.units.get(unit_id.into()).await?;
    Ok(web::Json(unit_response(unit, state.markup)))
}

/// Search the catalogue for units free during the requested stay.
#[utoipa::path(
    get,
    path = "/api/v1/units/search",
    params(SearchUnitsQuery),
    responses(
        (status = 200, description = "Matching units", body = SearchUnitsResponseBody),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 503, description = "Service unavailable", body = crate::domain::DomainError)
    ),
    tags = ["units"],
    operation_id = "searchUnits"
)]
#[get("/units/search")]
pub async fn search_units(
    state: web::Data<HttpState>,
    query: web::Query<SearchUnitsQuery>,
) -> ApiResult<web::Json<SearchUnitsResponseBody>> {
    let query = query.into_inner();
    let date_range = parse_date_range(query.check_in_date, query.check_out_date)?;
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT);

    let units = state
        .units
        .search(UnitSearch {
            filter: UnitFilter {
                number_of_rooms: query.number_of_rooms,
                accommodation_type: query.accommodation_type,
                floor: query.floor,
                min_cost: query.min_cost,
                max_cost: query.max_cost,
            },
            date_range,
            offset,
            limit,
        })
        .await?;

    let items = units
        .into_iter()
        .map(|unit| unit_response(unit, state.markup))
        .collect();
    Ok(web::Json(SearchUnitsResponseBody {
        items,
        offset,
        limit,
    }))
}

#[cfg(test)]
#[path = "units_tests.rs"]
mod tests;
