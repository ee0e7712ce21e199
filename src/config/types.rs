//! Reference data types.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the YAML reference files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{ExperienceLevel, LocationRecord, normalize_name};

/// Calculator-wide settings from `calculator.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Country the freelancer lives and pays tax in.
    pub home_country: String,
    /// ISO code of the freelancer's currency.
    pub local_currency: String,
    /// ISO code of the currency location data is expressed in.
    pub reference_currency: String,
    /// Local currency units per reference currency unit, used when a request
    /// does not supply its own rate.
    pub default_exchange_rate: Decimal,
}

/// An inclusive `{min, max}` band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketBand {
    /// Lower bound.
    pub min: Decimal,
    /// Upper bound.
    pub max: Decimal,
}

impl MarketBand {
    /// Returns the midpoint of the band.
    pub fn midpoint(&self) -> Decimal {
        (self.min + self.max) / Decimal::TWO
    }
}

/// One value per experience level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceBands<T> {
    /// Junior value.
    pub junior: T,
    /// Pleno (mid-level) value.
    pub pleno: T,
    /// Senior value.
    pub senior: T,
    /// Specialist value.
    pub specialist: T,
}

impl<T> ExperienceBands<T> {
    /// Returns the value for an experience level.
    pub fn get(&self, level: ExperienceLevel) -> &T {
        match level {
            ExperienceLevel::Junior => &self.junior,
            ExperienceLevel::Pleno => &self.pleno,
            ExperienceLevel::Senior => &self.senior,
            ExperienceLevel::Specialist => &self.specialist,
        }
    }
}

/// Market data for a profession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionProfile {
    /// Display name.
    pub name: String,
    /// Monthly salary ranges per level, in local currency.
    pub salary_range: ExperienceBands<MarketBand>,
    /// Typical freelance hourly band, in local currency.
    pub market_average: MarketBand,
    /// Freelance hourly bands per level, in the reference currency.
    pub experience_rates: ExperienceBands<MarketBand>,
}

/// Professions file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionsConfig {
    /// Map of profession key to profile.
    pub professions: HashMap<String, ProfessionProfile>,
}

/// Cost-of-living data for a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateProfile {
    /// Display name.
    pub name: String,
    /// Cost-of-living index, 100 = baseline.
    pub cost_index: Decimal,
}

/// States file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StatesConfig {
    /// Map of lowercase state code to profile.
    pub states: HashMap<String, StateProfile>,
}

/// Locations file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsConfig {
    /// Every known client location.
    pub locations: Vec<LocationRecord>,
}

/// All reference data loaded from a directory.
///
/// Locations keep their file order and are indexed by normalised
/// (city, country).
#[derive(Debug, Clone)]
pub struct ReferenceData {
    settings: CalculatorSettings,
    professions: HashMap<String, ProfessionProfile>,
    states: HashMap<String, StateProfile>,
    locations: Vec<LocationRecord>,
    location_index: HashMap<(String, String), usize>,
}

impl ReferenceData {
    /// Creates reference data from its component parts.
    ///
    /// Profession keys and state codes are lowercased. When two locations
    /// share a normalised key the first one wins.
    pub fn new(
        settings: CalculatorSettings,
        professions: HashMap<String, ProfessionProfile>,
        states: HashMap<String, StateProfile>,
        locations: Vec<LocationRecord>,
    ) -> Self {
        let professions = professions
            .into_iter()
            .map(|(key, profile)| (key.to_lowercase(), profile))
            .collect();
        let states = states
            .into_iter()
            .map(|(code, profile)| (code.to_lowercase(), profile))
            .collect();

        let mut location_index = HashMap::with_capacity(locations.len());
        for (idx, location) in locations.iter().enumerate() {
            location_index.entry(location.key()).or_insert(idx);
        }

        Self {
            settings,
            professions,
            states,
            locations,
            location_index,
        }
    }

    /// Returns the calculator settings.
    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Returns all professions.
    pub fn professions(&self) -> &HashMap<String, ProfessionProfile> {
        &self.professions
    }

    /// Returns all states.
    pub fn states(&self) -> &HashMap<String, StateProfile> {
        &self.states
    }

    /// Returns all locations in file order.
    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    /// Finds a location by display or normalised names.
    pub fn location(&self, city: &str, country: &str) -> Option<&LocationRecord> {
        self.location_index
            .get(&(normalize_name(city), normalize_name(country)))
            .map(|&idx| &self.locations[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeveloperRates, LocationCategory};

    fn settings() -> CalculatorSettings {
        CalculatorSettings {
            home_country: "Brazil".to_string(),
            local_currency: "BRL".to_string(),
            reference_currency: "USD".to_string(),
            default_exchange_rate: Decimal::new(557, 2),
        }
    }

    fn location(city: &str, country: &str, cost: i64) -> LocationRecord {
        LocationRecord {
            city: city.to_string(),
            country: country.to_string(),
            state: None,
            cost_of_living: Decimal::from(cost),
            purchasing_power_index: Decimal::ONE_HUNDRED,
            average_net_salary: Decimal::from(3000),
            local_developer_rates: DeveloperRates::default(),
            category: LocationCategory::MajorCity,
        }
    }

    #[test]
    fn test_location_lookup_ignores_case_and_accents() {
        let data = ReferenceData::new(
            settings(),
            HashMap::new(),
            HashMap::new(),
            vec![location("Zürich", "Switzerland", 4500)],
        );

        let found = data.location("zurich", " SWITZERLAND ").unwrap();
        assert_eq!(found.city, "Zürich");
        assert!(data.location("Zurich", "Austria").is_none());
    }

    #[test]
    fn test_duplicate_location_keeps_first() {
        let data = ReferenceData::new(
            settings(),
            HashMap::new(),
            HashMap::new(),
            vec![
                location("Lisbon", "Portugal", 1800),
                location("Lisboa", "Portugal", 1900),
                location("LISBON", "Portugal", 2000),
            ],
        );

        assert_eq!(
            data.location("lisbon", "portugal").unwrap().cost_of_living,
            Decimal::from(1800)
        );
        assert_eq!(data.locations().len(), 3);
    }

    #[test]
    fn test_state_codes_are_lowercased() {
        let mut states = HashMap::new();
        states.insert(
            "SP".to_string(),
            StateProfile {
                name: "São Paulo".to_string(),
                cost_index: Decimal::ONE_HUNDRED,
            },
        );

        let data = ReferenceData::new(settings(), HashMap::new(), states, Vec::new());
        assert!(data.states().contains_key("sp"));
    }

    #[test]
    fn test_experience_bands_get() {
        let bands = ExperienceBands {
            junior: 1,
            pleno: 2,
            senior: 3,
            specialist: 4,
        };

        assert_eq!(*bands.get(ExperienceLevel::Pleno), 2);
        assert_eq!(*bands.get(ExperienceLevel::Specialist), 4);
    }
}
