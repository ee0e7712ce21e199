//! Work schedule model.
//!
//! This module defines the [`ScheduleConfig`] type describing how much a
//! freelancer works: hours per day, days per week and vacation days per year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Weeks in a year used to turn a weekly schedule into yearly working days.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Months in a year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

const MAX_DAYS_PER_WEEK: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// Most billable hours a single day can hold.
pub const MAX_HOURS_PER_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Most vacation days a year can hold.
pub const MAX_VACATION_DAYS: Decimal = Decimal::from_parts(366, 0, 0, false, 0);

/// Represents a freelancer's work schedule.
///
/// Schedules are built fresh for each calculation request and are never
/// mutated afterwards.
///
/// # Example
///
/// ```
/// use freelance_rate_engine::models::ScheduleConfig;
/// use rust_decimal::Decimal;
///
/// let schedule = ScheduleConfig {
///     work_hours_per_day: Decimal::from(8),
///     work_days_per_week: Decimal::from(5),
///     vacation_days_per_year: Decimal::from(30),
/// };
///
/// assert!(schedule.validate().is_ok());
/// assert_eq!(schedule.working_days_per_year(), Decimal::from(230));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Billable hours per working day. Greater than zero, at most 24.
    pub work_hours_per_day: Decimal,
    /// Working days per week, between 1 and 7.
    pub work_days_per_week: Decimal,
    /// Vacation days taken per year, between 0 and 366.
    pub vacation_days_per_year: Decimal,
}

impl ScheduleConfig {
    /// Checks that every field is inside its allowed domain.
    ///
    /// This does not check whether vacation leaves any working days; that is
    /// reported as [`EngineError::InvalidSchedule`] by the base rate calculator.
    pub fn validate(&self) -> EngineResult<()> {
        if self.work_hours_per_day <= Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "work_hours_per_day".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.work_hours_per_day > MAX_HOURS_PER_DAY {
            return Err(EngineError::InvalidInput {
                field: "work_hours_per_day".to_string(),
                message: "must not exceed 24".to_string(),
            });
        }

        if self.work_days_per_week < Decimal::ONE || self.work_days_per_week > MAX_DAYS_PER_WEEK {
            return Err(EngineError::InvalidInput {
                field: "work_days_per_week".to_string(),
                message: "must be between 1 and 7".to_string(),
            });
        }

        if self.vacation_days_per_year < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "vacation_days_per_year".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.vacation_days_per_year > MAX_VACATION_DAYS {
            return Err(EngineError::InvalidInput {
                field: "vacation_days_per_year".to_string(),
                message: "must not exceed 366".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `52 * work_days_per_week - vacation_days_per_year`.
    ///
    /// The result may be zero or negative when vacation exceeds the scheduled days.
    pub fn working_days_per_year(&self) -> Decimal {
        WEEKS_PER_YEAR * self.work_days_per_week - self.vacation_days_per_year
    }

    /// Returns the working hours per year.
    pub fn working_hours_per_year(&self) -> Decimal {
        self.working_days_per_year() * self.work_hours_per_day
    }

    /// Returns the average working hours per month.
    pub fn working_hours_per_month(&self) -> Decimal {
        self.working_hours_per_year() / MONTHS_PER_YEAR
    }
}
