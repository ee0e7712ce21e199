//! Potential gain or loss from charging a location-adjusted rate.
//!
//! Compares net-of-tax monthly revenue at the home base rate against the
//! adjusted rate, where the adjusted rate may benefit from a reduced tax
//! percentage for exported services.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{checked_div, checked_mul, checked_sub};
use crate::error::EngineResult;
use crate::models::MONTHS_PER_YEAR;

/// Net revenue comparison between the base rate and an adjusted rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialGains {
    /// Net monthly revenue at the base rate.
    pub base_monthly_net: Decimal,
    /// Net monthly revenue at the adjusted rate.
    pub adjusted_monthly_net: Decimal,
    /// `adjusted_monthly_net - base_monthly_net`.
    pub monthly_difference: Decimal,
    /// Monthly difference over twelve months.
    pub yearly_difference: Decimal,
    /// Monthly difference as a percentage of the base net revenue.
    pub percentage_change: Decimal,
    /// True when the adjusted rate nets more than the base rate.
    pub is_gain: bool,
    /// Percentage points of tax saved (`original - effective`).
    pub tax_savings: Decimal,
}

/// Computes the net revenue difference between two hourly rates.
///
/// Both rates must be in the same currency. Fails with
/// [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput) when a
/// revenue figure exceeds the `Decimal` range.
///
/// # Arguments
///
/// * `base_rate` - The unadjusted hourly rate
/// * `adjusted_rate` - The location-adjusted hourly rate
/// * `working_hours_per_month` - Billable hours per month
/// * `original_tax_percent` - Tax applied to the base rate
/// * `effective_tax_percent` - Tax applied to the adjusted rate
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::calculate_potential_gains;
/// use rust_decimal::Decimal;
///
/// let gains = calculate_potential_gains(
///     Decimal::from(100),
///     Decimal::from(150),
///     Decimal::from(100),
///     Decimal::from(20),
///     Decimal::from(14),
/// )
/// .unwrap();
///
/// assert_eq!(gains.base_monthly_net, Decimal::from(8000));
/// assert_eq!(gains.adjusted_monthly_net, Decimal::from(12900));
/// assert!(gains.is_gain);
/// ```
pub fn calculate_potential_gains(
    base_rate: Decimal,
    adjusted_rate: Decimal,
    working_hours_per_month: Decimal,
    original_tax_percent: Decimal,
    effective_tax_percent: Decimal,
) -> EngineResult<PotentialGains> {
    let base_gross = checked_mul(base_rate, working_hours_per_month, "base_monthly_net")?;
    let base_monthly_net = net_of_tax(base_gross, original_tax_percent, "base_monthly_net")?;
    let adjusted_gross =
        checked_mul(adjusted_rate, working_hours_per_month, "adjusted_monthly_net")?;
    let adjusted_monthly_net =
        net_of_tax(adjusted_gross, effective_tax_percent, "adjusted_monthly_net")?;

    let monthly_difference =
        checked_sub(adjusted_monthly_net, base_monthly_net, "monthly_difference")?;
    let percentage_change = if base_monthly_net.is_zero() {
        Decimal::ZERO
    } else {
        let ratio = checked_div(monthly_difference, base_monthly_net, "percentage_change")?;
        checked_mul(ratio, Decimal::ONE_HUNDRED, "percentage_change")?
    };

    Ok(PotentialGains {
        base_monthly_net,
        adjusted_monthly_net,
        monthly_difference,
        yearly_difference: checked_mul(monthly_difference, MONTHS_PER_YEAR, "yearly_difference")?,
        percentage_change,
        is_gain: adjusted_monthly_net > base_monthly_net,
        tax_savings: original_tax_percent - effective_tax_percent,
    })
}

fn net_of_tax(gross: Decimal, tax_percent: Decimal, field: &str) -> EngineResult<Decimal> {
    checked_mul(gross, Decimal::ONE - tax_percent / Decimal::ONE_HUNDRED, field)
}
