//! HTTP API module for the Freelance Rate Engine.
//!
//! This module provides the REST endpoints for quoting hourly rates and
//! browsing the reference data.

mod handlers;
mod quote;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use quote::perform_quote;
pub use request::{
    CitiesQuery, ClientLocationRequest, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_LIMIT, MAX_PAGE_SIZE,
    MAX_SEARCH_LIMIT, QuoteRequest, SearchQuery,
};
pub use response::{ApiError, ApiErrorResponse, Pagination};
pub use state::AppState;
