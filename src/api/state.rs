//! Application state for the Freelance Rate Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ReferenceDataLoader;

/// Shared application state.
///
/// Holds the reference data, loaded once at startup and never mutated, so
/// handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    reference: Arc<ReferenceDataLoader>,
}

impl AppState {
    /// Creates a new application state with the given reference data.
    pub fn new(reference: ReferenceDataLoader) -> Self {
        Self {
            reference: Arc::new(reference),
        }
    }

    /// Returns a reference to the reference data loader.
    pub fn reference(&self) -> &ReferenceDataLoader {
        &self.reference
    }
}
