//! Situational rate multipliers.
//!
//! Work that needs extra revisions, a rush turnaround or a difficult client is
//! billed as a fixed multiple of the base rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{checked_mul, to_reference_currency};
use crate::error::EngineResult;

/// Multiplier for regular work (100%).
pub const REGULAR_MULTIPLIER: Decimal = Decimal::ONE;

/// Multiplier for work with extra revision rounds (125%).
pub const REVISION_MULTIPLIER: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Multiplier for rush jobs (150%).
pub const RUSH_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Multiplier for difficult clients (200%).
pub const DIFFICULT_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Hourly rates for each work situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSet {
    /// Regular work.
    pub regular: Decimal,
    /// Work with extra revision rounds.
    pub revision: Decimal,
    /// Rush jobs.
    pub rush: Decimal,
    /// Difficult clients.
    pub difficult: Decimal,
}

impl RateSet {
    /// Converts every rate into the reference currency.
    pub fn to_reference(&self, exchange_rate: Decimal) -> EngineResult<RateSet> {
        Ok(RateSet {
            regular: to_reference_currency(self.regular, exchange_rate)?,
            revision: to_reference_currency(self.revision, exchange_rate)?,
            rush: to_reference_currency(self.rush, exchange_rate)?,
            difficult: to_reference_currency(self.difficult, exchange_rate)?,
        })
    }
}

/// Applies the fixed situational multipliers to a base rate.
///
/// Fails with [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// when a multiplied rate exceeds the `Decimal` range.
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::apply_multipliers;
/// use rust_decimal::Decimal;
///
/// let rates = apply_multipliers(Decimal::from(40)).unwrap();
///
/// assert_eq!(rates.regular, Decimal::from(40));
/// assert_eq!(rates.revision, Decimal::from(50));
/// assert_eq!(rates.rush, Decimal::from(60));
/// assert_eq!(rates.difficult, Decimal::from(80));
/// ```
pub fn apply_multipliers(base_rate: Decimal) -> EngineResult<RateSet> {
    Ok(RateSet {
        regular: checked_mul(base_rate, REGULAR_MULTIPLIER, "regular_rate")?,
        revision: checked_mul(base_rate, REVISION_MULTIPLIER, "revision_rate")?,
        rush: checked_mul(base_rate, RUSH_MULTIPLIER, "rush_rate")?,
        difficult: checked_mul(base_rate, DIFFICULT_MULTIPLIER, "difficult_rate")?,
    })
}
