//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{DateRange, DomainError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidDate,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn validation_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> DomainError {
    DomainError::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, DomainError> {
    Uuid::parse_str(&value).map_err(|_| {
        let name = field.as_str();
        validation_error(
            field,
            format!("{name} must be a valid UUID"),
            ErrorCode::InvalidUuid,
            &value,
        )
    })
}

pub(crate) fn parse_date(value: String, field: FieldName) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
        let name = field.as_str();
        validation_error(
            field,
            format!("{name} must be a calendar date (YYYY-MM-DD)"),
            ErrorCode::InvalidDate,
            &value,
        )
    })
}

/// Parse a check-in/check-out pair into a validated half-open range.
pub(crate) fn parse_date_range(check_in: String, check_out: String) -> Result<DateRange, DomainError> {
    let check_in = parse_date(check_in, FieldName::new("checkInDate"))?;
    let check_out = parse_date(check_out, FieldName::new("checkOutDate"))?;
    DateRange::try_new(check_in, check_out)
        .map_err(|err| DomainError::invalid_request(err.to_string()))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode as DomainCode;

    #[rstest]
    fn parse_uuid_flags_the_offending_field() {
        let err = parse_uuid("not-a-uuid".to_owned(), FieldName::new("unitId"))
            .expect_err("invalid uuid rejected");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "unitId");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    #[case("2025-13-40")]
    #[case("20 Dec 2025")]
    #[case("")]
    fn parse_date_rejects_malformed_input(#[case] value: &str) {
        let err = parse_date(value.to_owned(), FieldName::new("checkInDate"))
            .expect_err("invalid date rejected");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
    }

    #[rstest]
    fn parse_date_range_requires_chronological_dates() {
        let err = parse_date_range("2025-12-25".to_owned(), "2025-12-20".to_owned())
            .expect_err("inverted range rejected");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.message(), "checkOutDate must be after checkInDate");

        let range = parse_date_range("2025-12-20".to_owned(), "2025-12-25".to_owned())
            .expect("valid range accepted");
        assert_eq!(range.nights(), 5);
    }
}
