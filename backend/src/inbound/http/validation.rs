//! Shared validation helpers for inbound HTTP adapters.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{Error, FoodId, ReportKind};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidInteger,
    InvalidDate,
    UnknownQuery,
    MalformedBody,
    MalformedQueryString,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidDate => "invalid_date",
            Self::UnknownQuery => "unknown_query",
            Self::MalformedBody => "malformed_body",
            Self::MalformedQueryString => "malformed_query_string",
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

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn invalid_value(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse a listing identifier from a path or query segment.
pub(crate) fn parse_food_id(value: &str, field: FieldName) -> Result<FoodId, Error> {
    value.trim().parse::<i32>().map(FoodId::new).map_err(|_| {
        invalid_value(
            field,
            ErrorCode::InvalidInteger,
            format!("{} must be an integer", field.as_str()),
            value,
        )
    })
}

/// Parse an optional `YYYY-MM-DD` date.
pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                invalid_value(
                    field,
                    ErrorCode::InvalidDate,
                    format!("{} must be a YYYY-MM-DD date", field.as_str()),
                    raw,
                )
            })
        })
        .transpose()
}

/// Resolve a catalog query by its kebab-case name.
pub(crate) fn parse_report_kind(name: &str) -> Result<ReportKind, Error> {
    ReportKind::from_name(name).ok_or_else(|| {
        Error::not_found(format!("unknown query: {name}")).with_details(json!({
            "query": name,
            "code": ErrorCode::UnknownQuery.as_str(),
        }))
    })
}

fn malformed_input(field: &str, code: ErrorCode, reason: String) -> Error {
    Error::invalid_request(format!("{field} could not be parsed")).with_details(json!({
        "field": field,
        "code": code.as_str(),
        "reason": reason,
    }))
}

/// Envelope for a JSON body that failed to extract (bad syntax, wrong
/// types, out-of-range numbers, wrong content type).
pub(crate) fn malformed_body(error: &JsonPayloadError) -> Error {
    let reason = match error {
        JsonPayloadError::Deserialize(inner) => inner.to_string(),
        other => other.to_string(),
    };
    malformed_input("body", ErrorCode::MalformedBody, reason)
}

/// Envelope for a query string that failed to deserialise.
pub(crate) fn malformed_query_string(error: &QueryPayloadError) -> Error {
    malformed_input("query", ErrorCode::MalformedQueryString, error.to_string())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode as DomainCode;

    const FIELD: FieldName = FieldName::new("foodId");

    #[rstest]
    #[case("7", 7)]
    #[case(" 12 ", 12)]
    fn parses_integer_ids(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(parse_food_id(raw, FIELD).expect("valid id"), FoodId::new(expected));
    }

    #[rstest]
    fn rejects_non_integer_ids() {
        let error = parse_food_id("abc", FIELD).expect_err("invalid id");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({"field": "foodId", "value": "abc", "code": "invalid_integer"}))
        );
    }

    #[rstest]
    fn parses_optional_dates() {
        let field = FieldName::new("today");
        assert_eq!(parse_optional_date(None, field).expect("absent"), None);
        assert_eq!(
            parse_optional_date(Some("2025-03-17"), field).expect("valid date"),
            NaiveDate::from_ymd_opt(2025, 3, 17)
        );
        assert!(parse_optional_date(Some("17/03/2025"), field).is_err());
    }

    #[rstest]
    fn unknown_query_names_are_not_found() {
        let error = parse_report_kind("no-such-query").expect_err("unknown");
        assert_eq!(error.code(), DomainCode::NotFound);
    }

    #[rstest]
    fn malformed_bodies_use_the_error_envelope() {
        let inner = serde_json::from_str::<i32>("\"ten\"").expect_err("not an integer");
        let error = malformed_body(&JsonPayloadError::Deserialize(inner));

        assert_eq!(error.code(), DomainCode::InvalidRequest);
        let details = error.details().expect("details");
        assert_eq!(details["field"], "body");
        assert_eq!(details["code"], "malformed_body");
        assert!(
            details["reason"]
                .as_str()
                .is_some_and(|reason| reason.contains("invalid type"))
        );
    }

    #[rstest]
    fn wrong_content_type_is_a_malformed_body() {
        let error = malformed_body(&JsonPayloadError::ContentType);

        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(
            error.details().map(|details| &details["code"]),
            Some(&json!("malformed_body"))
        );
    }

    #[rstest]
    fn malformed_query_strings_use_the_error_envelope() {
        let inner = <serde::de::value::Error as serde::de::Error>::custom("duplicate field `city`");
        let error = malformed_query_string(&QueryPayloadError::Deserialize(inner));

        assert_eq!(error.code(), DomainCode::InvalidRequest);
        let details = error.details().expect("details");
        assert_eq!(details["field"], "query");
        assert_eq!(details["code"], "malformed_query_string");
    }
}
