//! Expense and margin model.
//!
//! This module defines the [`ExpenseConfig`] type: monthly living costs plus
//! the savings, discretionary and tax percentages a rate must cover.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest accepted monthly expense amount (10^15).
pub const MAX_MONTHLY_EXPENSES: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Monthly expenses and the percentage margins applied on top of them.
///
/// # Example
///
/// ```
/// use freelance_rate_engine::models::ExpenseConfig;
/// use rust_decimal::Decimal;
///
/// let expenses = ExpenseConfig {
///     monthly_expenses: Decimal::from(2000),
///     savings_percent: Decimal::from(20),
///     extra_percent: Decimal::from(10),
///     tax_percent: Decimal::from(15),
/// };
///
/// assert!(expenses.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseConfig {
    /// Monthly cost of living in the local currency, at most
    /// [`MAX_MONTHLY_EXPENSES`].
    pub monthly_expenses: Decimal,
    /// Percentage of adjusted expenses set aside as savings, in `[0, 100)`.
    pub savings_percent: Decimal,
    /// Percentage of adjusted expenses for discretionary spending, in `[0, 100)`.
    pub extra_percent: Decimal,
    /// Flat tax as a percentage of gross income, in `[0, 100)`.
    pub tax_percent: Decimal,
}

impl ExpenseConfig {
    /// Checks that every field is inside its allowed domain.
    ///
    /// A tax percentage of 100 or more is reported as
    /// [`EngineError::InvalidTaxRate`]; every other violation is
    /// [`EngineError::InvalidInput`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.monthly_expenses < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "monthly_expenses".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.monthly_expenses > MAX_MONTHLY_EXPENSES {
            return Err(EngineError::InvalidInput {
                field: "monthly_expenses".to_string(),
                message: "value too large".to_string(),
            });
        }

        check_percent("savings_percent", self.savings_percent)?;
        check_percent("extra_percent", self.extra_percent)?;

        if self.tax_percent >= Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidTaxRate {
                tax_percent: self.tax_percent,
            });
        }
        if self.tax_percent < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "tax_percent".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        Ok(())
    }

    /// Returns a copy with a different tax percentage.
    pub fn with_tax_percent(&self, tax_percent: Decimal) -> Self {
        Self {
            tax_percent,
            ..self.clone()
        }
    }
}

fn check_percent(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value >= Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: "must be between 0 and 100 (exclusive)".to_string(),
        });
    }
    Ok(())
}
