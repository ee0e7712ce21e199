//! Response types for the Freelance Rate Engine API.
//!
//! This module defines the error response structures, the mapping from
//! engine errors to HTTP statuses, and the bodies of the lookup endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::LocationInsights;
use crate::config::{LocationStats, ProfessionProfile};
use crate::error::EngineError;
use crate::models::{LocationCategory, LocationRecord};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration parse error", message),
            },
            EngineError::InvalidTaxRate { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_TAX_RATE",
                    message,
                    "Tax is taken from gross income, so it must stay below 100%",
                ),
            ),
            EngineError::InvalidSchedule { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_SCHEDULE",
                    message,
                    "The schedule must leave at least some working time in the year",
                ),
            ),
            EngineError::InvalidInput { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details("INVALID_INPUT", message, format!("field: {}", field)),
            ),
            EngineError::InvalidExchangeRate { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_EXCHANGE_RATE", message))
            }
            EngineError::MissingLocationData { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("MISSING_LOCATION_DATA", message))
            }
            EngineError::LocationNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LOCATION_NOT_FOUND", message),
            },
            EngineError::ProfessionNotFound { key } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "PROFESSION_NOT_FOUND",
                    message,
                    format!("The profession '{}' is not in the reference data", key),
                ),
            ),
            EngineError::StateNotFound { code } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "STATE_NOT_FOUND",
                    message,
                    format!("The state code '{}' is not in the reference data", code),
                ),
            ),
        }
    }
}

/// A profession with its lookup key.
#[derive(Debug, Clone, Serialize)]
pub struct ProfessionEntry {
    /// Key to send as `profession` in a quote request.
    pub key: String,
    /// Market data.
    #[serde(flatten)]
    pub profile: ProfessionProfile,
}

/// A state with its lookup code.
#[derive(Debug, Clone, Serialize)]
pub struct StateEntry {
    /// Code to send as `state` in a quote request.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Cost-of-living index.
    pub cost_index: Decimal,
}

/// Body of `GET /api/exchange-rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateResponse {
    /// Freelancer's currency.
    pub local_currency: String,
    /// Currency of location data.
    pub reference_currency: String,
    /// Local units per reference unit.
    pub rate: Decimal,
}

/// Body of a successful `GET /api/location/{country}/{city}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    /// The location record.
    pub data: LocationRecord,
    /// Derived insights.
    pub insights: LocationInsights,
}

/// A location named in a not-found suggestion list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSuggestion {
    /// City name.
    pub city: String,
    /// Country name.
    pub country: String,
    /// State, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl From<&LocationRecord> for LocationSuggestion {
    fn from(location: &LocationRecord) -> Self {
        Self {
            city: location.city.clone(),
            country: location.country.clone(),
            state: location.state.clone(),
        }
    }
}

/// Body of a 404 from `GET /api/location/{country}/{city}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationNotFoundResponse {
    /// The error.
    #[serde(flatten)]
    pub error: ApiError,
    /// Similar cities.
    pub suggestions: Vec<LocationSuggestion>,
    /// Every country with data.
    pub available_countries: Vec<String>,
}

/// Filters echoed back by a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEcho {
    /// Free-text query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Category filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<LocationCategory>,
    /// Country filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Applied limit.
    pub limit: usize,
}

/// Body of `GET /api/location/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching locations.
    pub data: Vec<LocationRecord>,
    /// Number of returned locations.
    pub total: usize,
    /// Applied filters.
    pub query: SearchEcho,
}

/// Page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
    /// Number of matching records.
    pub total: usize,
    /// Number of pages.
    pub total_pages: usize,
    /// True when a later page has records.
    pub has_next: bool,
    /// True when the page is not the first.
    pub has_prev: bool,
}

impl Pagination {
    /// Builds page metadata for `total` records.
    ///
    /// Page and limit are raised to at least 1. Offsets saturate, so a page
    /// far past the end is simply empty.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
            has_next: page.saturating_mul(limit) < total,
            has_prev: page > 1,
        }
    }

    /// Index range of this page within the full list.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self
            .page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(self.total);
        let end = start.saturating_add(self.limit).min(self.total);
        start..end
    }
}

/// Body of `GET /api/location/cities`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesResponse {
    /// Locations on this page.
    pub data: Vec<LocationRecord>,
    /// Page metadata.
    pub pagination: Pagination,
}

/// Notable locations shown next to the statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsHighlights {
    /// Highest cost of living.
    pub most_expensive: Option<LocationRecord>,
    /// Lowest cost of living.
    pub most_affordable: Option<LocationRecord>,
    /// Highest average net salary.
    pub highest_salaries: Option<LocationRecord>,
    /// Highest purchasing power index.
    pub best_value: Option<LocationRecord>,
}

/// Body of `GET /api/location/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Aggregate figures.
    pub data: LocationStats,
    /// Notable locations.
    pub insights: StatsHighlights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_engine_error_status_mapping() {
        let cases = [
            (
                EngineError::ConfigNotFound {
                    path: "x.yaml".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
            (
                EngineError::InvalidTaxRate {
                    tax_percent: Decimal::ONE_HUNDRED,
                },
                StatusCode::BAD_REQUEST,
                "INVALID_TAX_RATE",
            ),
            (
                EngineError::InvalidSchedule {
                    message: "no days".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_SCHEDULE",
            ),
            (
                EngineError::LocationNotFound {
                    city: "Atlantis".to_string(),
                    country: "Nowhere".to_string(),
                },
                StatusCode::NOT_FOUND,
                "LOCATION_NOT_FOUND",
            ),
            (
                EngineError::ProfessionNotFound {
                    key: "astronaut".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "PROFESSION_NOT_FOUND",
            ),
            (
                EngineError::StateNotFound {
                    code: "xx".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "STATE_NOT_FOUND",
            ),
        ];

        for (engine_error, status, code) in cases {
            let api_error: ApiErrorResponse = engine_error.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.error.code, code);
        }
    }

    #[test]
    fn test_pagination_pages() {
        let first = Pagination::new(1, 10, 24);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next);
        assert!(!first.has_prev);
        assert_eq!(first.range(), 0..10);

        let last = Pagination::new(3, 10, 24);
        assert!(!last.has_next);
        assert!(last.has_prev);
        assert_eq!(last.range(), 20..24);

        let beyond = Pagination::new(5, 10, 24);
        assert_eq!(beyond.range(), 24..24);
    }

    #[test]
    fn test_pagination_saturates_on_huge_values() {
        let huge_limit = Pagination::new(2, usize::MAX, 24);
        assert_eq!(huge_limit.total_pages, 1);
        assert!(!huge_limit.has_next);
        assert_eq!(huge_limit.range(), 24..24);

        let huge_page = Pagination::new(usize::MAX, 10, 24);
        assert!(!huge_page.has_next);
        assert!(huge_page.has_prev);
        assert_eq!(huge_page.range(), 24..24);

        let first = Pagination::new(1, usize::MAX, 24);
        assert_eq!(first.range(), 0..24);
    }

    #[test]
    fn test_not_found_body_flattens_error() {
        let body = LocationNotFoundResponse {
            error: ApiError::new("LOCATION_NOT_FOUND", "Location not found: Atlantis, Nowhere"),
            suggestions: vec![],
            available_countries: vec!["Brazil".to_string()],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "LOCATION_NOT_FOUND");
        assert_eq!(json["available_countries"][0], "Brazil");
    }
}
