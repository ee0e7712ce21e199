//! Market positioning.
//!
//! This module classifies a computed rate against the profession's market band,
//! and against local developer rates when the client's location is known.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{checked_div, checked_mul, round_half_up, round_percent};
use crate::config::{MarketBand, ProfessionProfile};
use crate::error::{EngineError, EngineResult};
use crate::models::{ExperienceLevel, LocationRecord};

const BELOW_MARKET_FACTOR: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
const ABOVE_MARKET_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);
const COST_INDEX_FLOOR: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
const VERY_COMPETITIVE_ADVANTAGE: i64 = 50;
const COMPETITIVE_ADVANTAGE: i64 = 25;
const NEAR_MARKET_ADVANTAGE: i64 = -25;

/// Position of a rate within a profession's market band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    /// Below 80% of the market minimum.
    BelowMarket,
    /// Above 120% of the market maximum.
    AboveMarket,
    /// Above the midpoint of the band.
    AboveAverage,
    /// Anywhere else.
    Competitive,
}

impl MarketPosition {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            MarketPosition::BelowMarket => "Below market",
            MarketPosition::AboveMarket => "Above market",
            MarketPosition::AboveAverage => "Above average",
            MarketPosition::Competitive => "Competitive",
        }
    }
}

/// Position of a rate relative to local developers in the client's city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalMarketPosition {
    /// More than 50% cheaper than local developers.
    VeryCompetitive,
    /// More than 25% cheaper.
    Competitive,
    /// Cheaper, by up to 25%.
    SlightlyCompetitive,
    /// Within 25% above the local rate.
    NearLocalMarket,
    /// 25% or more above the local rate.
    AboveLocalMarket,
}

impl LocalMarketPosition {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            LocalMarketPosition::VeryCompetitive => "Very competitive",
            LocalMarketPosition::Competitive => "Competitive",
            LocalMarketPosition::SlightlyCompetitive => "Slightly competitive",
            LocalMarketPosition::NearLocalMarket => "Near local market",
            LocalMarketPosition::AboveLocalMarket => "Above local market",
        }
    }
}

/// A rate's position against local developers, with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitivePosition {
    /// The position band.
    pub position: LocalMarketPosition,
    /// Rounded percentage by which the rate undercuts the local rate.
    pub advantage_percent: i64,
    /// Human-readable explanation.
    pub reasoning: String,
}

/// Classifies a rate against a market band.
///
/// Rules are evaluated in order and the first match wins:
///
/// 1. `rate < market_min * 0.8` → [`MarketPosition::BelowMarket`]
/// 2. `rate > market_max * 1.2` → [`MarketPosition::AboveMarket`]
/// 3. `rate > (market_min + market_max) / 2` → [`MarketPosition::AboveAverage`]
/// 4. otherwise → [`MarketPosition::Competitive`]
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::{classify_position, MarketPosition};
/// use rust_decimal::Decimal;
///
/// let position = classify_position(Decimal::from(30), Decimal::from(45), Decimal::from(85));
/// assert_eq!(position, MarketPosition::BelowMarket);
/// ```
pub fn classify_position(rate: Decimal, market_min: Decimal, market_max: Decimal) -> MarketPosition {
    let average = (market_min + market_max) / Decimal::TWO;

    if rate < market_min * BELOW_MARKET_FACTOR {
        MarketPosition::BelowMarket
    } else if rate > market_max * ABOVE_MARKET_FACTOR {
        MarketPosition::AboveMarket
    } else if rate > average {
        MarketPosition::AboveAverage
    } else {
        MarketPosition::Competitive
    }
}

/// Scales a profession's market band by the cost-of-living index.
///
/// Each bound becomes `round(bound * cost_index / 100)`.
pub fn adjusted_market_range(band: &MarketBand, cost_index_percent: Decimal) -> MarketBand {
    let factor = cost_index_percent / Decimal::ONE_HUNDRED;
    MarketBand {
        min: round_half_up(band.min * factor),
        max: round_half_up(band.max * factor),
    }
}

/// Returns the USD market band for an experience level, scaled by cost of living.
///
/// The cost-of-living factor never drops below 0.8, so low-cost regions are
/// not quoted unrealistically low bands.
pub fn experience_market_rates(
    profile: &ProfessionProfile,
    level: ExperienceLevel,
    cost_index_percent: Decimal,
) -> MarketBand {
    let band = profile.experience_rates.get(level);
    let factor = (cost_index_percent / Decimal::ONE_HUNDRED).max(COST_INDEX_FLOOR);
    MarketBand {
        min: round_half_up(band.min * factor),
        max: round_half_up(band.max * factor),
    }
}

/// Compares a rate against the developers in the client's city.
///
/// The local rate is the tier matching `level` (`pleno` maps to mid-level,
/// `specialist` to senior). Without a location the rate is reported as
/// competitive in the home market.
///
/// # Errors
///
/// Returns [`EngineError::MissingLocationData`] when the mapped local rate is
/// absent or not positive, and [`EngineError::InvalidInput`] when the advantage
/// exceeds the `Decimal` range.
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::{competitive_position, LocalMarketPosition};
/// use freelance_rate_engine::models::ExperienceLevel;
/// use rust_decimal::Decimal;
///
/// let result = competitive_position(Decimal::from(30), None, ExperienceLevel::Senior).unwrap();
/// assert_eq!(result.position, LocalMarketPosition::Competitive);
/// assert_eq!(result.advantage_percent, 0);
/// ```
pub fn competitive_position(
    rate_reference: Decimal,
    location: Option<&LocationRecord>,
    level: ExperienceLevel,
) -> EngineResult<CompetitivePosition> {
    let Some(location) = location else {
        return Ok(CompetitivePosition {
            position: LocalMarketPosition::Competitive,
            advantage_percent: 0,
            reasoning: "Competitive position in the home market".to_string(),
        });
    };

    let tier = level.rate_tier();
    let local_rate = location
        .local_developer_rates
        .usable(tier)
        .ok_or_else(|| EngineError::MissingLocationData {
            city: location.city.clone(),
            country: location.country.clone(),
            message: format!("{} developer rate is missing or not positive", tier.as_str()),
        })?;

    let gap = local_rate - rate_reference;
    let share = checked_div(gap, local_rate, "rate_reference")?;
    let advantage = round_percent(checked_mul(share, Decimal::ONE_HUNDRED, "rate_reference")?);
    let city = &location.city;

    let (position, reasoning) = if advantage > VERY_COMPETITIVE_ADVANTAGE {
        (
            LocalMarketPosition::VeryCompetitive,
            format!("{}% cheaper than local developers in {}", advantage, city),
        )
    } else if advantage > COMPETITIVE_ADVANTAGE {
        (
            LocalMarketPosition::Competitive,
            format!("{}% cheaper than local developers in {}", advantage, city),
        )
    } else if advantage > 0 {
        (
            LocalMarketPosition::SlightlyCompetitive,
            format!("{}% cheaper than local developers in {}", advantage, city),
        )
    } else if advantage > NEAR_MARKET_ADVANTAGE {
        (
            LocalMarketPosition::NearLocalMarket,
            format!("Rate similar to local developers in {}", city),
        )
    } else {
        (
            LocalMarketPosition::AboveLocalMarket,
            format!(
                "Rate {}% above local developers in {}",
                advantage.abs(),
                city
            ),
        )
    };

    Ok(CompetitivePosition {
        position,
        advantage_percent: advantage,
        reasoning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExperienceBands;
    use crate::models::{DeveloperRates, LocationCategory};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn band(min: &str, max: &str) -> MarketBand {
        MarketBand {
            min: dec(min),
            max: dec(max),
        }
    }

    fn create_location(mid: Option<&str>, senior: &str) -> LocationRecord {
        LocationRecord {
            city: "Berlin".to_string(),
            country: "Germany".to_string(),
            state: None,
            cost_of_living: dec("2800"),
            purchasing_power_index: dec("105"),
            average_net_salary: dec("3400"),
            local_developer_rates: DeveloperRates {
                junior: Some(dec("35")),
                mid: mid.map(dec),
                senior: Some(dec(senior)),
            },
            category: LocationCategory::TechHub,
        }
    }

    #[test]
    fn test_classify_position_rules_in_order() {
        assert_eq!(
            classify_position(dec("35.9"), dec("45"), dec("85")),
            MarketPosition::BelowMarket
        );
        assert_eq!(
            classify_position(dec("102.1"), dec("45"), dec("85")),
            MarketPosition::AboveMarket
        );
        assert_eq!(
            classify_position(dec("66"), dec("45"), dec("85")),
            MarketPosition::AboveAverage
        );
        assert_eq!(
            classify_position(dec("65"), dec("45"), dec("85")),
            MarketPosition::Competitive
        );
        assert_eq!(
            classify_position(dec("36"), dec("45"), dec("85")),
            MarketPosition::Competitive
        );
    }

    #[test]
    fn test_position_labels() {
        assert_eq!(MarketPosition::BelowMarket.label(), "Below market");
        assert_eq!(MarketPosition::AboveAverage.label(), "Above average");
        assert_eq!(LocalMarketPosition::NearLocalMarket.label(), "Near local market");
    }

    #[test]
    fn test_adjusted_market_range_rounds_bounds() {
        let range = adjusted_market_range(&band("45", "85"), dec("75"));

        // 33.75 -> 34, 63.75 -> 64
        assert_eq!(range.min, dec("34"));
        assert_eq!(range.max, dec("64"));
    }

    #[test]
    fn test_experience_market_rates_floor_cost_index() {
        let profile = ProfessionProfile {
            name: "Backend Developer".to_string(),
            salary_range: ExperienceBands {
                junior: band("4000", "6500"),
                pleno: band("5000", "9000"),
                senior: band("7000", "13000"),
                specialist: band("9000", "16000"),
            },
            market_average: band("50", "90"),
            experience_rates: ExperienceBands {
                junior: band("15", "22"),
                pleno: band("22", "30"),
                senior: band("30", "40"),
                specialist: band("40", "50"),
            },
        };

        let low_cost = experience_market_rates(&profile, ExperienceLevel::Senior, dec("45"));
        assert_eq!(low_cost.min, dec("24"));
        assert_eq!(low_cost.max, dec("32"));

        let baseline = experience_market_rates(&profile, ExperienceLevel::Pleno, dec("100"));
        assert_eq!(baseline.min, dec("22"));
        assert_eq!(baseline.max, dec("30"));
    }

    #[test]
    fn test_competitive_position_bands() {
        let location = create_location(Some("60"), "100");
        let cases = [
            ("40", ExperienceLevel::Senior, LocalMarketPosition::VeryCompetitive, 60),
            ("70", ExperienceLevel::Senior, LocalMarketPosition::Competitive, 30),
            ("90", ExperienceLevel::Specialist, LocalMarketPosition::SlightlyCompetitive, 10),
            ("110", ExperienceLevel::Senior, LocalMarketPosition::NearLocalMarket, -10),
            ("130", ExperienceLevel::Senior, LocalMarketPosition::AboveLocalMarket, -30),
            ("30", ExperienceLevel::Pleno, LocalMarketPosition::Competitive, 50),
            ("75", ExperienceLevel::Senior, LocalMarketPosition::SlightlyCompetitive, 25),
            ("100", ExperienceLevel::Senior, LocalMarketPosition::NearLocalMarket, 0),
            ("125", ExperienceLevel::Senior, LocalMarketPosition::AboveLocalMarket, -25),
        ];

        for (rate, level, expected, advantage) in cases {
            let result = competitive_position(dec(rate), Some(&location), level).unwrap();
            assert_eq!(result.position, expected, "rate {}", rate);
            assert_eq!(result.advantage_percent, advantage, "rate {}", rate);
        }
    }

    #[test]
    fn test_competitive_position_reasoning_mentions_city() {
        let location = create_location(Some("60"), "100");

        let cheaper = competitive_position(dec("40"), Some(&location), ExperienceLevel::Senior).unwrap();
        assert_eq!(cheaper.reasoning, "60% cheaper than local developers in Berlin");

        let above = competitive_position(dec("130"), Some(&location), ExperienceLevel::Senior).unwrap();
        assert_eq!(above.reasoning, "Rate 30% above local developers in Berlin");
    }

    #[test]
    fn test_competitive_position_missing_tier_returns_error() {
        let location = create_location(None, "100");

        match competitive_position(dec("40"), Some(&location), ExperienceLevel::Pleno) {
            Err(EngineError::MissingLocationData { message, .. }) => {
                assert!(message.contains("mid"));
            }
            other => panic!("Expected MissingLocationData, got {:?}", other),
        }
    }
}
