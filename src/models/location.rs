//! Client location models.
//!
//! This module defines [`LocationRecord`], the cost-of-living and developer-rate
//! metrics for a city, together with the helpers used to build lookup keys.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Broad classification of a city's economy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    /// A city with a concentrated technology industry.
    TechHub,
    /// A financial or commercial centre.
    BusinessCenter,
    /// A national capital.
    Capital,
    /// Any other large city.
    MajorCity,
}

impl LocationCategory {
    /// Returns the snake_case identifier used in data files and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCategory::TechHub => "tech_hub",
            LocationCategory::BusinessCenter => "business_center",
            LocationCategory::Capital => "capital",
            LocationCategory::MajorCity => "major_city",
        }
    }
}

/// Seniority tiers used by local developer rate data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTier {
    /// Junior developers.
    Junior,
    /// Mid-level developers.
    Mid,
    /// Senior developers.
    Senior,
}

impl RateTier {
    /// Returns the snake_case identifier used in data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            RateTier::Junior => "junior",
            RateTier::Mid => "mid",
            RateTier::Senior => "senior",
        }
    }
}

/// Hourly rates charged by local developers, in the reference currency.
///
/// Any tier may be absent from the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperRates {
    /// Junior developer hourly rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junior: Option<Decimal>,
    /// Mid-level developer hourly rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<Decimal>,
    /// Senior developer hourly rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senior: Option<Decimal>,
}

impl DeveloperRates {
    /// Returns the rate for a tier when it is present and positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use freelance_rate_engine::models::{DeveloperRates, RateTier};
    /// use rust_decimal::Decimal;
    ///
    /// let rates = DeveloperRates {
    ///     junior: Some(Decimal::from(40)),
    ///     mid: Some(Decimal::ZERO),
    ///     senior: None,
    /// };
    ///
    /// assert_eq!(rates.usable(RateTier::Junior), Some(Decimal::from(40)));
    /// assert_eq!(rates.usable(RateTier::Mid), None);
    /// assert_eq!(rates.usable(RateTier::Senior), None);
    /// ```
    pub fn usable(&self, tier: RateTier) -> Option<Decimal> {
        let rate = match tier {
            RateTier::Junior => self.junior,
            RateTier::Mid => self.mid,
            RateTier::Senior => self.senior,
        };
        rate.filter(|r| *r > Decimal::ZERO)
    }
}

/// Cost-of-living metrics for a city.
///
/// Records are immutable reference data looked up by normalised
/// (city, country) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// City name as displayed.
    pub city: String,
    /// Country name as displayed.
    pub country: String,
    /// State, province or region, when relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Monthly cost of living for a single person, in USD.
    pub cost_of_living: Decimal,
    /// Purchasing power relative to the baseline (100 = baseline).
    pub purchasing_power_index: Decimal,
    /// Average monthly net salary, in USD.
    pub average_net_salary: Decimal,
    /// Local developer hourly rates, in USD.
    pub local_developer_rates: DeveloperRates,
    /// Economic category of the city.
    pub category: LocationCategory,
}

impl LocationRecord {
    /// Returns the normalised (city, country) lookup key for this record.
    pub fn key(&self) -> (String, String) {
        (normalize_name(&self.city), normalize_name(&self.country))
    }
}

/// Normalises a place name for lookups and search.
///
/// Lowercases, decomposes to NFD, strips combining marks and trims whitespace,
/// so that "São Paulo" and " sao paulo" compare equal.
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::models::normalize_name;
///
/// assert_eq!(normalize_name("São Paulo "), "sao paulo");
/// assert_eq!(normalize_name("ZÜRICH"), "zurich");
/// ```
pub fn normalize_name(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}
