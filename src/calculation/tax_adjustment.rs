//! Tax adjustment for clients abroad.
//!
//! Services exported to a client in another country are modelled as taxed at a
//! reduced rate: 70% of the domestic rate, never below 6%.

use rust_decimal::Decimal;

use crate::models::normalize_name;

/// Share of the domestic tax rate applied to exported services.
pub const EXPORT_TAX_FACTOR: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Minimum tax percentage applied to exported services.
pub const EXPORT_TAX_FLOOR_PERCENT: Decimal = Decimal::from_parts(6, 0, 0, false, 0);

/// Returns the tax percentage that applies for a client in `client_country`.
///
/// Countries are compared after name normalisation. Domestic clients keep
/// `original_tax_percent`; foreign clients get
/// `max(original_tax_percent * 0.7, 6)`.
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::effective_tax_percent;
/// use rust_decimal::Decimal;
///
/// let foreign = effective_tax_percent(Decimal::from(20), "United States", "Brazil");
/// assert_eq!(foreign, Decimal::from(14));
///
/// let domestic = effective_tax_percent(Decimal::from(20), "brasil", "Brasil");
/// assert_eq!(domestic, Decimal::from(20));
/// ```
pub fn effective_tax_percent(
    original_tax_percent: Decimal,
    client_country: &str,
    home_country: &str,
) -> Decimal {
    if is_domestic(client_country, home_country) {
        return original_tax_percent;
    }

    (original_tax_percent * EXPORT_TAX_FACTOR).max(EXPORT_TAX_FLOOR_PERCENT)
}

/// Returns true when both names refer to the same country after normalisation.
pub fn is_domestic(client_country: &str, home_country: &str) -> bool {
    normalize_name(client_country) == normalize_name(home_country)
}
