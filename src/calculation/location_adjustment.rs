//! Client location adjustment.
//!
//! This module rescales a freelancer's base rate for a remote client's city.
//! Two heuristics are combined, and the higher result wins:
//!
//! - **purchasing power**: the base rate scaled by the city's purchasing power
//!   index, never below 80% of the base rate;
//! - **competitive floor**: 75% of what local senior developers charge, the
//!   remote-work discount clients typically expect.
//!
//! All comparisons happen in the reference currency (USD).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{
    checked_div, checked_mul, checked_sub, round_half_up, round_percent, to_reference_currency,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{LocationRecord, RateTier};

/// Lowest purchasing-power scaling applied to the base rate.
pub const PURCHASING_POWER_FLOOR: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Share of the local senior rate used as the competitive floor.
pub const COMPETITIVE_RATE_FACTOR: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

/// Multipliers above this value classify the adjustment as premium.
pub const PREMIUM_THRESHOLD: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Multipliers below this value classify the adjustment as competitive.
pub const COMPETITIVE_THRESHOLD: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// How the adjusted rate relates to the unadjusted base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentPosition {
    /// The rate was raised by more than 20%.
    Premium,
    /// The rate was lowered by more than 10%.
    Competitive,
    /// The rate stayed within -10%..+20% of the base rate.
    Balanced,
}

/// Comparison of the adjusted rate against local senior developers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentComparison {
    /// Local senior developer hourly rate, in USD.
    pub local_senior_rate: Decimal,
    /// How much cheaper the adjusted rate is than the local senior rate,
    /// as a rounded percentage. Negative when it is more expensive.
    pub your_advantage_percent: i64,
    /// Classification of the adjustment.
    pub competitive_position: AdjustmentPosition,
}

/// A base rate adjusted for a client location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAdjustment {
    /// Base rate converted to USD before adjustment.
    pub base_rate_reference: Decimal,
    /// The adjusted hourly rate, in USD.
    pub adjusted_rate: Decimal,
    /// `adjusted_rate / base_rate_reference`. Always positive.
    pub multiplier: Decimal,
    /// Human-readable explanation of the adjustment.
    pub reasoning: String,
    /// Comparison against the local market.
    pub comparison: AdjustmentComparison,
}

/// Adjusts a base rate for a client's location.
///
/// # Arguments
///
/// * `base_rate_local` - The base hourly rate in the freelancer's currency
/// * `location` - The client's location record
/// * `exchange_rate` - Local currency units per USD
///
/// # Errors
///
/// - [`EngineError::MissingLocationData`] when the senior rate is absent or not positive
/// - [`EngineError::InvalidExchangeRate`] when `exchange_rate` is not positive
/// - [`EngineError::InvalidInput`] when `base_rate_local` is not positive, or when
///   a derived figure exceeds the `Decimal` range
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::{adjust_for_location, AdjustmentPosition};
/// use freelance_rate_engine::models::{DeveloperRates, LocationCategory, LocationRecord};
/// use rust_decimal::Decimal;
///
/// let location = LocationRecord {
///     city: "San Francisco".to_string(),
///     country: "United States".to_string(),
///     state: Some("CA".to_string()),
///     cost_of_living: Decimal::from(4200),
///     purchasing_power_index: Decimal::from(150),
///     average_net_salary: Decimal::from(7800),
///     local_developer_rates: DeveloperRates {
///         junior: Some(Decimal::from(45)),
///         mid: Some(Decimal::from(65)),
///         senior: Some(Decimal::from(80)),
///     },
///     category: LocationCategory::TechHub,
/// };
///
/// let adjustment = adjust_for_location(Decimal::new(1995, 2), &location, Decimal::new(557, 2)).unwrap();
///
/// assert_eq!(adjustment.adjusted_rate, Decimal::from(60));
/// assert_eq!(adjustment.comparison.competitive_position, AdjustmentPosition::Premium);
/// ```
pub fn adjust_for_location(
    base_rate_local: Decimal,
    location: &LocationRecord,
    exchange_rate: Decimal,
) -> EngineResult<LocationAdjustment> {
    let local_senior_rate = location
        .local_developer_rates
        .usable(RateTier::Senior)
        .ok_or_else(|| EngineError::MissingLocationData {
            city: location.city.clone(),
            country: location.country.clone(),
            message: "senior developer rate is missing or not positive".to_string(),
        })?;

    if base_rate_local <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "base_rate".to_string(),
            message: "must be greater than zero to adjust for location".to_string(),
        });
    }

    let base_rate_reference = to_reference_currency(base_rate_local, exchange_rate)?;

    let purchasing_power_multiplier =
        (location.purchasing_power_index / Decimal::ONE_HUNDRED).max(PURCHASING_POWER_FLOOR);
    let competitive_rate = local_senior_rate * COMPETITIVE_RATE_FACTOR;

    let scaled_rate = checked_mul(
        base_rate_reference,
        purchasing_power_multiplier,
        "adjusted_rate",
    )?;
    let adjusted_rate = scaled_rate.max(competitive_rate);
    let multiplier = checked_div(adjusted_rate, base_rate_reference, "multiplier")?;

    let gap = checked_sub(local_senior_rate, adjusted_rate, "adjusted_rate")?;
    let share = checked_div(gap, local_senior_rate, "adjusted_rate")?;
    let your_advantage_percent =
        round_percent(checked_mul(share, Decimal::ONE_HUNDRED, "adjusted_rate")?);

    let (competitive_position, reasoning) = classify_adjustment(multiplier, &location.city)?;

    Ok(LocationAdjustment {
        base_rate_reference,
        adjusted_rate,
        multiplier,
        reasoning,
        comparison: AdjustmentComparison {
            local_senior_rate,
            your_advantage_percent,
            competitive_position,
        },
    })
}

fn classify_adjustment(
    multiplier: Decimal,
    city: &str,
) -> EngineResult<(AdjustmentPosition, String)> {
    let classified = if multiplier > PREMIUM_THRESHOLD {
        let increase = round_half_up(checked_mul(
            multiplier - Decimal::ONE,
            Decimal::ONE_HUNDRED,
            "multiplier",
        )?);
        (
            AdjustmentPosition::Premium,
            format!(
                "Rate adjusted upward (+{}%) due to high purchasing power in {}",
                increase, city
            ),
        )
    } else if multiplier < COMPETITIVE_THRESHOLD {
        let decrease = round_half_up((Decimal::ONE - multiplier) * Decimal::ONE_HUNDRED);
        (
            AdjustmentPosition::Competitive,
            format!(
                "Competitive rate (-{}%) considering the local market in {}",
                decrease, city
            ),
        )
    } else {
        (
            AdjustmentPosition::Balanced,
            format!(
                "Rate balanced between your home costs and the {} market",
                city
            ),
        )
    };

    Ok(classified)
}
