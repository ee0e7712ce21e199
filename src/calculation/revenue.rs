//! Revenue projections from an hourly rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::{checked_mul, to_reference_currency};
use crate::error::EngineResult;
use crate::models::{MONTHS_PER_YEAR, ScheduleConfig};

/// Average number of weeks in a month.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Revenue at a given hourly rate over several periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueProjection {
    /// Revenue for one working day.
    pub daily: Decimal,
    /// Revenue for one working week.
    pub weekly: Decimal,
    /// Revenue for an average month (4.33 weeks).
    pub monthly: Decimal,
    /// Revenue for a year (12 average months).
    pub yearly: Decimal,
}

impl RevenueProjection {
    /// Converts every figure into the reference currency.
    pub fn to_reference(&self, exchange_rate: Decimal) -> EngineResult<RevenueProjection> {
        Ok(RevenueProjection {
            daily: to_reference_currency(self.daily, exchange_rate)?,
            weekly: to_reference_currency(self.weekly, exchange_rate)?,
            monthly: to_reference_currency(self.monthly, exchange_rate)?,
            yearly: to_reference_currency(self.yearly, exchange_rate)?,
        })
    }
}

/// Projects daily, weekly, monthly and yearly revenue at `rate`.
///
/// Vacation is not subtracted: the projection describes a period of full work.
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::project_revenue;
/// use freelance_rate_engine::models::ScheduleConfig;
/// use rust_decimal::Decimal;
///
/// let schedule = ScheduleConfig {
///     work_hours_per_day: Decimal::from(8),
///     work_days_per_week: Decimal::from(5),
///     vacation_days_per_year: Decimal::from(30),
/// };
///
/// let revenue = project_revenue(Decimal::from(50), &schedule).unwrap();
/// assert_eq!(revenue.daily, Decimal::from(400));
/// assert_eq!(revenue.weekly, Decimal::from(2000));
/// assert_eq!(revenue.monthly, Decimal::from(8660));
/// assert_eq!(revenue.yearly, Decimal::from(103920));
/// ```
pub fn project_revenue(
    rate: Decimal,
    schedule: &ScheduleConfig,
) -> EngineResult<RevenueProjection> {
    let daily = checked_mul(rate, schedule.work_hours_per_day, "daily_revenue")?;
    let weekly = checked_mul(daily, schedule.work_days_per_week, "weekly_revenue")?;
    let monthly = checked_mul(weekly, WEEKS_PER_MONTH, "monthly_revenue")?;
    let yearly = checked_mul(monthly, MONTHS_PER_YEAR, "yearly_revenue")?;

    Ok(RevenueProjection {
        daily,
        weekly,
        monthly,
        yearly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_part_time_projection() {
        let schedule = ScheduleConfig {
            work_hours_per_day: dec("6"),
            work_days_per_week: dec("4"),
            vacation_days_per_year: dec("0"),
        };

        let revenue = project_revenue(dec("25"), &schedule).unwrap();

        assert_eq!(revenue.daily, dec("150"));
        assert_eq!(revenue.weekly, dec("600"));
        assert_eq!(revenue.monthly, dec("2598"));
        assert_eq!(revenue.yearly, dec("31176"));
    }

    #[test]
    fn test_oversized_rate_returns_error() {
        let schedule = ScheduleConfig {
            work_hours_per_day: dec("24"),
            work_days_per_week: dec("7"),
            vacation_days_per_year: dec("0"),
        };

        match project_revenue(Decimal::MAX / dec("100"), &schedule) {
            Err(crate::error::EngineError::InvalidInput { message, .. }) => {
                assert_eq!(message, "value too large");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_to_reference_converts_all_periods() {
        let revenue = RevenueProjection {
            daily: dec("557"),
            weekly: dec("1114"),
            monthly: dec("5570"),
            yearly: dec("55700"),
        };

        let usd = revenue.to_reference(dec("5.57")).unwrap();

        assert_eq!(usd.daily, dec("100"));
        assert_eq!(usd.weekly, dec("200"));
        assert_eq!(usd.monthly, dec("1000"));
        assert_eq!(usd.yearly, dec("10000"));
    }
}
