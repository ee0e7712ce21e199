//! HTTP request handlers for the Freelance Rate Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::cmp::Reverse;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::location_insights;
use crate::error::EngineError;
use crate::models::{LocationRecord, normalize_name};

use super::quote::perform_quote;
use super::request::{CitiesQuery, QuoteRequest, SearchQuery};
use super::response::{
    ApiError, ApiErrorResponse, CitiesResponse, ExchangeRateResponse, LocationNotFoundResponse,
    LocationResponse, LocationSuggestion, Pagination, ProfessionEntry, SearchEcho,
    SearchResponse, StateEntry, StatsHighlights, StatsResponse,
};
use super::state::AppState;

const MAX_SUGGESTIONS: usize = 5;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/api/professions", get(professions_handler))
        .route("/api/states", get(states_handler))
        .route("/api/exchange-rate", get(exchange_rate_handler))
        .route("/api/location/search", get(search_handler))
        .route("/api/location/cities", get(cities_handler))
        .route("/api/location/stats", get(stats_handler))
        .route("/api/location/:country/:city", get(location_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a quote request and returns the full quote.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return error_response(ApiErrorResponse::bad_request(error));
        }
    };

    let start_time = Instant::now();
    match perform_quote(&request, state.reference()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                profession = %request.profession,
                state = %request.state,
                client_adjusted = result.client.is_some(),
                warnings = result.audit_trace.warnings.len(),
                base_rate = %result.base_rate.round_dp(2),
                duration_us = start_time.elapsed().as_micros(),
                "Quote completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Quote failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /api/professions. Sorted by key.
async fn professions_handler(State(state): State<AppState>) -> Response {
    let mut professions: Vec<ProfessionEntry> = state
        .reference()
        .data()
        .professions()
        .iter()
        .map(|(key, profile)| ProfessionEntry {
            key: key.clone(),
            profile: profile.clone(),
        })
        .collect();
    professions.sort_by(|a, b| a.key.cmp(&b.key));

    json_response(StatusCode::OK, professions)
}

/// Handler for GET /api/states. Sorted by code.
async fn states_handler(State(state): State<AppState>) -> Response {
    let mut states: Vec<StateEntry> = state
        .reference()
        .data()
        .states()
        .iter()
        .map(|(code, profile)| StateEntry {
            code: code.clone(),
            name: profile.name.clone(),
            cost_index: profile.cost_index,
        })
        .collect();
    states.sort_by(|a, b| a.code.cmp(&b.code));

    json_response(StatusCode::OK, states)
}

/// Handler for GET /api/exchange-rate.
async fn exchange_rate_handler(State(state): State<AppState>) -> Response {
    let settings = state.reference().settings();
    json_response(
        StatusCode::OK,
        ExchangeRateResponse {
            local_currency: settings.local_currency.clone(),
            reference_currency: settings.reference_currency.clone(),
            rate: settings.default_exchange_rate,
        },
    )
}

/// Handler for GET /api/location/{country}/{city}.
///
/// Unknown locations answer 404 with similar cities and the countries that
/// have data.
async fn location_handler(
    State(state): State<AppState>,
    Path((country, city)): Path<(String, String)>,
) -> Response {
    let reference = state.reference();

    match reference.find_location(&city, &country) {
        Ok(location) => json_response(
            StatusCode::OK,
            LocationResponse {
                data: location.clone(),
                insights: location_insights(location),
            },
        ),
        Err(err @ EngineError::LocationNotFound { .. }) => {
            info!(city = %city, country = %country, "Location not found");
            let suggestions = reference
                .search_cities(&city)
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(LocationSuggestion::from)
                .collect();
            json_response(
                StatusCode::NOT_FOUND,
                LocationNotFoundResponse {
                    error: ApiError::with_details(
                        "LOCATION_NOT_FOUND",
                        err.to_string(),
                        format!("We don't have data for {}, {} yet", city, country),
                    ),
                    suggestions,
                    available_countries: reference.available_countries(),
                },
            )
        }
        Err(err) => error_response(err.into()),
    }
}

/// Handler for GET /api/location/search.
///
/// The free-text query, category and country filters combine; at least one
/// is required.
async fn search_handler(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(rejection),
    };

    if query.is_empty() {
        return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
            "Provide at least one of: q, category, country",
        )));
    }

    let reference = state.reference();
    let country = query.country_filter().map(normalize_name);

    let candidates = match (query.text(), query.category, query.country_filter()) {
        (Some(text), _, _) => reference.search_cities(text),
        (None, Some(category), _) => reference.cities_by_category(category),
        (None, None, Some(country)) => reference.cities_by_country(country),
        (None, None, None) => Vec::new(),
    };

    let limit = query.effective_limit();
    let data: Vec<LocationRecord> = candidates
        .into_iter()
        .filter(|l| query.category.is_none_or(|c| l.category == c))
        .filter(|l| {
            country
                .as_deref()
                .is_none_or(|c| normalize_name(&l.country) == c)
        })
        .take(limit)
        .cloned()
        .collect();

    json_response(
        StatusCode::OK,
        SearchResponse {
            total: data.len(),
            data,
            query: SearchEcho {
                q: query.text().map(str::to_string),
                category: query.category,
                country: query.country_filter().map(str::to_string),
                limit,
            },
        },
    )
}

/// Handler for GET /api/location/cities.
///
/// Lists locations by ascending cost of living, one page at a time.
async fn cities_handler(
    State(state): State<AppState>,
    query: Result<Query<CitiesQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(rejection),
    };

    let reference = state.reference();
    let mut cities = match query.category {
        Some(category) => reference.cities_by_category(category),
        None => reference.all_cities(),
    };
    cities.sort_by_key(|l| l.cost_of_living);

    let pagination = Pagination::new(query.effective_page(), query.effective_limit(), cities.len());
    let data = cities[pagination.range()].iter().map(|&l| l.clone()).collect();

    json_response(StatusCode::OK, CitiesResponse { data, pagination })
}

/// Handler for GET /api/location/stats.
async fn stats_handler(State(state): State<AppState>) -> Response {
    let reference = state.reference();
    let cities = reference.all_cities();

    // min_by_key keeps the first of equal elements
    let insights = StatsHighlights {
        most_expensive: cities
            .iter()
            .min_by_key(|l| Reverse(l.cost_of_living))
            .map(|&l| l.clone()),
        most_affordable: cities
            .iter()
            .min_by_key(|l| l.cost_of_living)
            .map(|&l| l.clone()),
        highest_salaries: cities
            .iter()
            .min_by_key(|l| Reverse(l.average_net_salary))
            .map(|&l| l.clone()),
        best_value: cities
            .iter()
            .min_by_key(|l| Reverse(l.purchasing_power_index))
            .map(|&l| l.clone()),
    };

    json_response(
        StatusCode::OK,
        StatsResponse {
            data: reference.stats(),
            insights,
        },
    )
}

fn query_rejection(rejection: QueryRejection) -> Response {
    warn!(error = %rejection.body_text(), "Query string rejected");
    error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
        rejection.body_text(),
    )))
}
