//! Rounding and currency conversion helpers shared by the calculators.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Rounds to the nearest integer, with halves rounded towards positive infinity.
///
/// `2.5` becomes `3` and `-2.5` becomes `-2`.
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_half_up(Decimal::new(25, 1)), Decimal::from(3));
/// assert_eq!(round_half_up(Decimal::new(-25, 1)), Decimal::from(-2));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    // values this close to Decimal::MAX carry no fractional digits
    value.checked_add(HALF).unwrap_or(value).floor()
}

/// Rounds to the nearest integer percentage and returns it as an `i64`.
///
/// Percentages outside the `i64` range saturate.
pub fn round_percent(value: Decimal) -> i64 {
    round_half_up(value).to_i64().unwrap_or(if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// `lhs * rhs`, or [`EngineError::InvalidInput`] naming `field` on overflow.
pub(crate) fn checked_mul(lhs: Decimal, rhs: Decimal, field: &str) -> EngineResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| too_large(field))
}

/// `lhs / rhs`, or [`EngineError::InvalidInput`] naming `field` on overflow.
///
/// Callers guarantee a non-zero divisor.
pub(crate) fn checked_div(lhs: Decimal, rhs: Decimal, field: &str) -> EngineResult<Decimal> {
    lhs.checked_div(rhs).ok_or_else(|| too_large(field))
}

/// `lhs + rhs`, or [`EngineError::InvalidInput`] naming `field` on overflow.
pub(crate) fn checked_add(lhs: Decimal, rhs: Decimal, field: &str) -> EngineResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| too_large(field))
}

/// `lhs - rhs`, or [`EngineError::InvalidInput`] naming `field` on overflow.
pub(crate) fn checked_sub(lhs: Decimal, rhs: Decimal, field: &str) -> EngineResult<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| too_large(field))
}

fn too_large(field: &str) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: "value too large".to_string(),
    }
}

/// Converts an amount in the local currency into the reference currency.
///
/// `exchange_rate` is the number of local currency units per reference unit.
/// Fails with [`EngineError::InvalidExchangeRate`] when it is not positive.
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::to_reference_currency;
/// use rust_decimal::Decimal;
///
/// let usd = to_reference_currency(Decimal::from(557), Decimal::new(557, 2)).unwrap();
/// assert_eq!(usd, Decimal::from(100));
/// ```
pub fn to_reference_currency(amount: Decimal, exchange_rate: Decimal) -> EngineResult<Decimal> {
    if exchange_rate <= Decimal::ZERO {
        return Err(EngineError::InvalidExchangeRate {
            rate: exchange_rate,
        });
    }
    checked_div(amount, exchange_rate, "exchange_rate")
}
