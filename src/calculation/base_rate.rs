//! Base rate calculation functionality.
//!
//! This module turns monthly expenses, savings/extra/tax margins and a work
//! schedule into the gross hourly rate a freelancer must charge to cover them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{checked_add, checked_div, checked_mul};
use crate::error::{EngineError, EngineResult};
use crate::models::{ExpenseConfig, ScheduleConfig};

/// Every intermediate figure of a base rate calculation.
///
/// Presentation layers show these values as a step-by-step explanation of
/// how the rate was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRateBreakdown {
    /// Monthly expenses scaled by the cost-of-living index.
    pub adjusted_expenses: Decimal,
    /// Monthly amount set aside as savings.
    pub savings_amount: Decimal,
    /// Monthly amount for discretionary spending.
    pub extra_amount: Decimal,
    /// Net income needed per month.
    pub net_monthly_needs: Decimal,
    /// Gross income needed per month once tax is grossed up.
    pub gross_monthly_needs: Decimal,
    /// Working days left in the year after vacation.
    pub working_days_per_year: Decimal,
    /// Working hours per year.
    pub working_hours_per_year: Decimal,
    /// Average working hours per month.
    pub working_hours_per_month: Decimal,
    /// The resulting hourly rate.
    pub base_rate: Decimal,
}

/// Computes the base hourly rate needed to cover expenses, margins and tax.
///
/// # Algorithm
///
/// 1. `adjusted_expenses = monthly_expenses * cost_index_percent / 100`
/// 2. savings and extra amounts are percentages of the adjusted expenses
/// 3. `net_monthly_needs = adjusted + savings + extra`
/// 4. `gross_monthly_needs = net / (1 - tax_percent / 100)`
/// 5. `working_days_per_year = 52 * work_days_per_week - vacation_days_per_year`
/// 6. `working_hours_per_month = working_days_per_year * work_hours_per_day / 12`
/// 7. `base_rate = gross_monthly_needs / working_hours_per_month`
///
/// # Errors
///
/// - [`EngineError::InvalidTaxRate`] when `tax_percent >= 100`
/// - [`EngineError::InvalidSchedule`] when no working time is left in the year
/// - [`EngineError::InvalidInput`] for any other out-of-domain field, including
///   a cost-of-living index that is not positive, or when an intermediate
///   figure exceeds the `Decimal` range
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::compute_base_rate;
/// use freelance_rate_engine::models::{ExpenseConfig, ScheduleConfig};
/// use rust_decimal::Decimal;
///
/// let expenses = ExpenseConfig {
///     monthly_expenses: Decimal::from(2000),
///     savings_percent: Decimal::from(20),
///     extra_percent: Decimal::from(10),
///     tax_percent: Decimal::from(15),
/// };
/// let schedule = ScheduleConfig {
///     work_hours_per_day: Decimal::from(8),
///     work_days_per_week: Decimal::from(5),
///     vacation_days_per_year: Decimal::from(30),
/// };
///
/// let breakdown = compute_base_rate(&expenses, Decimal::ONE_HUNDRED, &schedule).unwrap();
/// assert_eq!(breakdown.base_rate.round_dp(2), Decimal::new(1995, 2));
/// ```
pub fn compute_base_rate(
    expenses: &ExpenseConfig,
    cost_index_percent: Decimal,
    schedule: &ScheduleConfig,
) -> EngineResult<BaseRateBreakdown> {
    expenses.validate()?;
    schedule.validate()?;

    if cost_index_percent <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "cost_index_percent".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    let adjusted_expenses = checked_mul(
        expenses.monthly_expenses,
        checked_div(cost_index_percent, Decimal::ONE_HUNDRED, "cost_index_percent")?,
        "monthly_expenses",
    )?;
    let savings_amount = checked_mul(
        adjusted_expenses,
        expenses.savings_percent / Decimal::ONE_HUNDRED,
        "monthly_expenses",
    )?;
    let extra_amount = checked_mul(
        adjusted_expenses,
        expenses.extra_percent / Decimal::ONE_HUNDRED,
        "monthly_expenses",
    )?;
    let net_monthly_needs = checked_add(
        checked_add(adjusted_expenses, savings_amount, "monthly_expenses")?,
        extra_amount,
        "monthly_expenses",
    )?;

    // validate() guarantees tax < 100, so the divisor is positive
    let retained_share = Decimal::ONE - expenses.tax_percent / Decimal::ONE_HUNDRED;
    let gross_monthly_needs = checked_div(net_monthly_needs, retained_share, "monthly_expenses")?;

    let working_days_per_year = schedule.working_days_per_year();
    if working_days_per_year <= Decimal::ZERO {
        return Err(EngineError::InvalidSchedule {
            message: format!(
                "{} vacation days leave {} working days per year",
                schedule.vacation_days_per_year, working_days_per_year
            ),
        });
    }

    let working_hours_per_year = schedule.working_hours_per_year();
    let working_hours_per_month = schedule.working_hours_per_month();
    if working_hours_per_month <= Decimal::ZERO {
        return Err(EngineError::InvalidSchedule {
            message: format!(
                "{} working hours per month leaves no billable time",
                working_hours_per_month
            ),
        });
    }

    let base_rate = checked_div(gross_monthly_needs, working_hours_per_month, "base_rate")?;

    Ok(BaseRateBreakdown {
        adjusted_expenses,
        savings_amount,
        extra_amount,
        net_monthly_needs,
        gross_monthly_needs,
        working_days_per_year,
        working_hours_per_year,
        working_hours_per_month,
        base_rate,
    })
}
