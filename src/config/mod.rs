//! Reference data loading for the Freelance Rate Engine.
//!
//! This module loads the calculator's static tables from YAML files:
//! profession market bands, state cost-of-living indices, client city
//! records and calculator-wide settings.
//!
//! # Example
//!
//! ```no_run
//! use freelance_rate_engine::config::ReferenceDataLoader;
//!
//! let loader = ReferenceDataLoader::load("./config/reference").unwrap();
//! println!("Home country: {}", loader.settings().home_country);
//! ```

mod loader;
mod types;

pub use loader::{LocationStats, ReferenceDataLoader};
pub use types::{
    CalculatorSettings, ExperienceBands, LocationsConfig, MarketBand, ProfessionProfile,
    ProfessionsConfig, ReferenceData, StateProfile, StatesConfig,
};
