//! Request types for the Freelance Rate Engine API.
//!
//! This module defines the JSON body of the `/calculate` endpoint and the
//! query strings of the location endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ExperienceLevel, ExpenseConfig, LocationCategory, ScheduleConfig};

/// Default number of results returned by a location search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Largest number of results a location search may return.
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Default page size of the city listing.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page size of the city listing.
pub const MAX_PAGE_SIZE: usize = 100;

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Profession key (e.g., "backend").
    pub profession: String,
    /// Experience level. Defaults to pleno.
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    /// State code used for the cost-of-living index (e.g., "sp").
    pub state: String,
    /// Monthly expenses and margins.
    pub expenses: ExpenseConfig,
    /// Work schedule.
    pub schedule: ScheduleConfig,
    /// Local currency units per reference unit. Defaults to the configured rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    /// Where the client is based, when quoting for a remote client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_location: Option<ClientLocationRequest>,
}

/// Client location in a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientLocationRequest {
    /// City name. Accents and case are ignored.
    pub city: String,
    /// Country name. Accents and case are ignored.
    pub country: String,
}

/// Query string of `GET /api/location/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Free-text search over city, country and state.
    pub q: Option<String>,
    /// Restrict to a category.
    pub category: Option<LocationCategory>,
    /// Restrict to a country.
    pub country: Option<String>,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Returns the free-text query when it is not blank.
    pub fn text(&self) -> Option<&str> {
        non_blank(self.q.as_deref())
    }

    /// Returns the country filter when it is not blank.
    pub fn country_filter(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }

    /// Returns true when no filter was provided.
    pub fn is_empty(&self) -> bool {
        self.text().is_none() && self.category.is_none() && self.country_filter().is_none()
    }

    /// Returns the requested limit, defaulted and capped.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .min(MAX_SEARCH_LIMIT)
    }
}

/// Query string of `GET /api/location/cities`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CitiesQuery {
    /// 1-based page number.
    pub page: Option<usize>,
    /// Page size.
    pub limit: Option<usize>,
    /// Restrict to a category.
    pub category: Option<LocationCategory>,
}

impl CitiesQuery {
    /// Returns the page number, at least 1.
    pub fn effective_page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Returns the page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
