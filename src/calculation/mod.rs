//! Calculation logic for the Freelance Rate Engine.
//!
//! This module contains the pure calculation functions: base rate derivation
//! from expenses and schedule, situational multipliers, revenue projection,
//! international tax adjustment, client location adjustment with potential
//! gains, market positioning and location insights.

mod base_rate;
mod insights;
mod location_adjustment;
mod market_position;
mod multipliers;
mod potential_gains;
mod revenue;
mod rounding;
mod tax_adjustment;

pub use base_rate::{BaseRateBreakdown, compute_base_rate};
pub use insights::{
    CostLevel, Competitiveness, LocationInsights, Recommendation, SalaryLevel, competitiveness,
    cost_level, location_insights, recommendation, salary_level,
};
pub use location_adjustment::{
    AdjustmentComparison, AdjustmentPosition, COMPETITIVE_RATE_FACTOR, COMPETITIVE_THRESHOLD,
    LocationAdjustment, PREMIUM_THRESHOLD, PURCHASING_POWER_FLOOR, adjust_for_location,
};
pub use market_position::{
    CompetitivePosition, LocalMarketPosition, MarketPosition, adjusted_market_range,
    classify_position, competitive_position, experience_market_rates,
};
pub use multipliers::{
    DIFFICULT_MULTIPLIER, REGULAR_MULTIPLIER, REVISION_MULTIPLIER, RUSH_MULTIPLIER, RateSet,
    apply_multipliers,
};
pub use potential_gains::{PotentialGains, calculate_potential_gains};
pub use revenue::{RevenueProjection, WEEKS_PER_MONTH, project_revenue};
pub use rounding::{round_half_up, round_percent, to_reference_currency};
pub(crate) use rounding::checked_mul;
pub use tax_adjustment::{
    EXPORT_TAX_FACTOR, EXPORT_TAX_FLOOR_PERCENT, effective_tax_percent, is_domestic,
};
