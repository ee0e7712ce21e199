//! Reference data loading functionality.
//!
//! This module provides the [`ReferenceDataLoader`] type for loading the
//! calculator's reference tables from YAML files.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{LocationCategory, LocationRecord, normalize_name};

use super::types::{
    CalculatorSettings, LocationsConfig, ProfessionProfile, ProfessionsConfig, ReferenceData,
    StateProfile, StatesConfig,
};

/// Aggregate figures over every known location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationStats {
    /// Number of location records.
    pub total_cities: usize,
    /// Number of records per category.
    pub categories: BTreeMap<LocationCategory, usize>,
    /// Number of distinct countries.
    pub countries: usize,
    /// Mean monthly cost of living, in USD, rounded to 2 places.
    pub average_cost_of_living: Decimal,
    /// Mean purchasing power index, rounded to 2 places.
    pub average_purchasing_power: Decimal,
}

/// Loads and provides access to reference data.
///
/// The `ReferenceDataLoader` reads YAML files from a directory and provides
/// typed lookups over professions, states and client locations. Lookups never
/// fall back to a default: unknown keys are errors.
///
/// # Directory Structure
///
/// ```text
/// config/reference/
/// ├── calculator.yaml   # Home country, currencies, default exchange rate
/// ├── professions.yaml  # Salary and market bands per profession
/// ├── states.yaml       # Cost-of-living index per state
/// └── locations.yaml    # Client city records
/// ```
///
/// # Example
///
/// ```no_run
/// use freelance_rate_engine::config::ReferenceDataLoader;
///
/// let loader = ReferenceDataLoader::load("./config/reference")?;
/// let index = loader.cost_index("sp")?;
/// let berlin = loader.find_location("Berlin", "Germany")?;
/// println!("{} {}", index, berlin.cost_of_living);
/// # Ok::<(), freelance_rate_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceDataLoader {
    data: ReferenceData,
}

impl ReferenceDataLoader {
    /// Loads reference data from the specified directory.
    ///
    /// Fails with [`EngineError::ConfigNotFound`] when a file is missing and
    /// [`EngineError::ConfigParseError`] when a file is malformed or holds
    /// values the calculators cannot use.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("calculator.yaml");
        let settings = Self::load_yaml::<CalculatorSettings>(&settings_path)?;
        if settings.default_exchange_rate <= Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: settings_path.display().to_string(),
                message: "default_exchange_rate must be greater than zero".to_string(),
            });
        }

        let professions = Self::load_yaml::<ProfessionsConfig>(&path.join("professions.yaml"))?;

        let states_path = path.join("states.yaml");
        let states = Self::load_yaml::<StatesConfig>(&states_path)?;
        if let Some((code, _)) = states
            .states
            .iter()
            .find(|(_, state)| state.cost_index <= Decimal::ZERO)
        {
            return Err(EngineError::ConfigParseError {
                path: states_path.display().to_string(),
                message: format!("cost_index for '{}' must be greater than zero", code),
            });
        }

        let locations = Self::load_yaml::<LocationsConfig>(&path.join("locations.yaml"))?;

        Ok(Self::from_data(ReferenceData::new(
            settings,
            professions.professions,
            states.states,
            locations.locations,
        )))
    }

    /// Wraps already-built reference data.
    pub fn from_data(data: ReferenceData) -> Self {
        Self { data }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying reference data.
    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// Returns the calculator settings.
    pub fn settings(&self) -> &CalculatorSettings {
        self.data.settings()
    }

    /// Gets a profession by its key (e.g. `"backend"`). Keys are case-insensitive.
    pub fn profession(&self, key: &str) -> EngineResult<&ProfessionProfile> {
        self.data
            .professions()
            .get(&key.trim().to_lowercase())
            .ok_or_else(|| EngineError::ProfessionNotFound {
                key: key.to_string(),
            })
    }

    /// Gets a state by its code. Codes are case-insensitive.
    pub fn state(&self, code: &str) -> EngineResult<&StateProfile> {
        self.data
            .states()
            .get(&code.trim().to_lowercase())
            .ok_or_else(|| EngineError::StateNotFound {
                code: code.to_string(),
            })
    }

    /// Gets the cost-of-living index for a state.
    pub fn cost_index(&self, code: &str) -> EngineResult<Decimal> {
        self.state(code).map(|state| state.cost_index)
    }

    /// Finds a client location by city and country.
    ///
    /// Names are compared after normalisation, so accents and case do not matter.
    pub fn find_location(&self, city: &str, country: &str) -> EngineResult<&LocationRecord> {
        self.data
            .location(city, country)
            .ok_or_else(|| EngineError::LocationNotFound {
                city: city.to_string(),
                country: country.to_string(),
            })
    }

    /// Searches locations whose city, country or state contains `query`.
    ///
    /// Cities starting with the query come first; otherwise file order is kept.
    /// An empty query matches nothing.
    pub fn search_cities(&self, query: &str) -> Vec<&LocationRecord> {
        let needle = normalize_name(query);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(bool, &LocationRecord)> = self
            .data
            .locations()
            .iter()
            .filter_map(|location| {
                let city = normalize_name(&location.city);
                let hit = city.contains(&needle)
                    || normalize_name(&location.country).contains(&needle)
                    || location
                        .state
                        .as_deref()
                        .is_some_and(|state| normalize_name(state).contains(&needle));
                hit.then(|| (city.starts_with(&needle), location))
            })
            .collect();

        // stable sort keeps file order within each group
        matches.sort_by_key(|(prefix, _)| !*prefix);
        matches.into_iter().map(|(_, location)| location).collect()
    }

    /// Returns every location in a category.
    pub fn cities_by_category(&self, category: LocationCategory) -> Vec<&LocationRecord> {
        self.data
            .locations()
            .iter()
            .filter(|location| location.category == category)
            .collect()
    }

    /// Returns every location in a country.
    pub fn cities_by_country(&self, country: &str) -> Vec<&LocationRecord> {
        let country = normalize_name(country);
        self.data
            .locations()
            .iter()
            .filter(|location| normalize_name(&location.country) == country)
            .collect()
    }

    /// Returns every location in file order.
    pub fn all_cities(&self) -> Vec<&LocationRecord> {
        self.data.locations().iter().collect()
    }

    /// Returns the distinct country names, sorted.
    pub fn available_countries(&self) -> Vec<String> {
        self.data
            .locations()
            .iter()
            .map(|location| location.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Computes aggregate statistics over every location.
    pub fn stats(&self) -> LocationStats {
        let locations = self.data.locations();

        let mut categories = BTreeMap::new();
        for location in locations {
            *categories.entry(location.category).or_insert(0) += 1;
        }

        let (average_cost_of_living, average_purchasing_power) = if locations.is_empty() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let count = Decimal::from(locations.len());
            let total_cost: Decimal = locations.iter().map(|l| l.cost_of_living).sum();
            let total_power: Decimal = locations.iter().map(|l| l.purchasing_power_index).sum();
            (
                (total_cost / count).round_dp(2),
                (total_power / count).round_dp(2),
            )
        };

        LocationStats {
            total_cities: locations.len(),
            categories,
            countries: self.available_countries().len(),
            average_cost_of_living,
            average_purchasing_power,
        }
    }
}
