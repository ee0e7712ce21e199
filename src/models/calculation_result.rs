//! Quote result models for the Freelance Rate Engine.
//!
//! This module contains the [`QuoteResult`] type and its associated structures
//! that capture all outputs of a rate quote, including the base rate breakdown,
//! situational rates, revenue projections, market positioning, the optional
//! client location adjustment and an audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::LocationRecord;
use crate::calculation::{
    BaseRateBreakdown, CompetitivePosition, LocationAdjustment, LocationInsights, MarketPosition,
    PotentialGains, RateSet, RevenueProjection,
};
use crate::config::MarketBand;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate problems that did not stop the quote but changed its
/// outcome, such as a client location falling back to the unadjusted rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a quote.
///
/// # Example
///
/// ```
/// use freelance_rate_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// How the quoted rate compares with the profession's market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketComparison {
    /// Market band in local currency per hour, scaled by the cost-of-living index.
    pub range: MarketBand,
    /// Position of the final base rate within `range`.
    pub position: MarketPosition,
    /// Display label for `position`.
    pub label: String,
    /// Reference currency band for the experience level.
    pub experience_range: MarketBand,
    /// Position against developers in the client's city, or the home market.
    pub competitive_position: CompetitivePosition,
}

/// The client location part of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientQuote {
    /// The matched location record.
    pub location: LocationRecord,
    /// Insights for the location.
    pub insights: LocationInsights,
    /// Tax percentage applied when invoicing this client.
    pub effective_tax_percent: Decimal,
    /// Base rate recomputed with `effective_tax_percent`, in local currency.
    pub base_rate_with_adjusted_tax: Decimal,
    /// The location adjustment, in the reference currency.
    pub adjustment: LocationAdjustment,
    /// Adjusted rate converted back to local currency.
    pub final_base_rate: Decimal,
    /// Net revenue comparison between the home and final base rates.
    pub potential_gains: PotentialGains,
}

/// The complete result of a rate quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Unique identifier for this quote.
    pub calculation_id: Uuid,
    /// When the quote was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the quote.
    pub engine_version: String,
    /// Cost-of-living index of the freelancer's state.
    pub cost_of_living_index: Decimal,
    /// Local currency units per reference unit used for conversions.
    pub exchange_rate: Decimal,
    /// Every intermediate value of the home base rate.
    pub breakdown: BaseRateBreakdown,
    /// Base rate the situational rates were derived from, in local currency.
    /// Equals `client.final_base_rate` when a client location was applied.
    pub base_rate: Decimal,
    /// Situational rates in local currency.
    pub rates: RateSet,
    /// Situational rates in the reference currency.
    pub rates_reference: RateSet,
    /// Revenue at the regular rate, in local currency.
    pub revenue: RevenueProjection,
    /// Revenue at the regular rate, in the reference currency.
    pub revenue_reference: RevenueProjection,
    /// Market positioning.
    pub market: MarketComparison,
    /// Client location adjustment, when one was requested and could be applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientQuote>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
