//! Core data models for the Freelance Rate Engine.
//!
//! This module contains the request-side inputs (schedule, expenses,
//! experience level), client location records and the quote result types.

mod calculation_result;
mod expenses;
mod location;
mod profession;
mod schedule;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, ClientQuote, MarketComparison, QuoteResult,
};
pub use expenses::{ExpenseConfig, MAX_MONTHLY_EXPENSES};
pub use location::{DeveloperRates, LocationCategory, LocationRecord, RateTier, normalize_name};
pub use profession::ExperienceLevel;
pub use schedule::{
    MAX_HOURS_PER_DAY, MAX_VACATION_DAYS, MONTHS_PER_YEAR, ScheduleConfig, WEEKS_PER_YEAR,
};
