//! Summary insights for a client location.
//!
//! Buckets a city's cost of living, salaries and developer rates into coarse
//! levels that are easier to read than raw figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{LocationRecord, RateTier};

/// Cost of living band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostLevel {
    /// Under 1000 USD/month.
    VeryLow,
    /// Under 2000 USD/month.
    Low,
    /// Under 3000 USD/month.
    Medium,
    /// Under 4000 USD/month.
    High,
    /// 4000 USD/month or more.
    VeryHigh,
}

/// Average net salary band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryLevel {
    /// Under 2000 USD/month.
    Low,
    /// Under 4000 USD/month.
    Medium,
    /// Under 6000 USD/month.
    High,
    /// 6000 USD/month or more.
    VeryHigh,
}

/// How hard it is to compete on price with local senior developers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competitiveness {
    /// Senior rate under 30 USD/h.
    VeryCompetitive,
    /// Senior rate under 60 USD/h.
    Competitive,
    /// Senior rate under 100 USD/h.
    Moderate,
    /// Senior rate of 100 USD/h or more.
    PremiumMarket,
}

/// Value-for-money verdict based on the salary to cost-of-living ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Ratio above 2.5.
    ExcellentValue,
    /// Ratio above 2.0.
    GoodValue,
    /// Ratio above 1.5.
    ReasonableValue,
    /// Anything lower.
    PremiumMarket,
}

impl Recommendation {
    /// Returns a human-readable explanation.
    pub fn description(&self) -> &'static str {
        match self {
            Recommendation::ExcellentValue => {
                "Excellent value: salaries are high relative to the cost of living"
            }
            Recommendation::GoodValue => "Good value: decent salary to cost ratio",
            Recommendation::ReasonableValue => "Reasonable value: moderate salary to cost ratio",
            Recommendation::PremiumMarket => {
                "Premium market: high costs but potentially many opportunities"
            }
        }
    }
}

/// All insights for a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInsights {
    /// Cost of living band.
    pub cost_level: CostLevel,
    /// Salary band.
    pub salary_level: SalaryLevel,
    /// Competitiveness against local seniors. Absent when the senior rate is unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitiveness: Option<Competitiveness>,
    /// Value-for-money verdict.
    pub recommendation: Recommendation,
    /// Explanation of the verdict.
    pub recommendation_text: String,
}

/// Buckets a monthly cost of living.
pub fn cost_level(cost_of_living: Decimal) -> CostLevel {
    if cost_of_living < Decimal::from(1000) {
        CostLevel::VeryLow
    } else if cost_of_living < Decimal::from(2000) {
        CostLevel::Low
    } else if cost_of_living < Decimal::from(3000) {
        CostLevel::Medium
    } else if cost_of_living < Decimal::from(4000) {
        CostLevel::High
    } else {
        CostLevel::VeryHigh
    }
}

/// Buckets an average monthly net salary.
pub fn salary_level(average_net_salary: Decimal) -> SalaryLevel {
    if average_net_salary < Decimal::from(2000) {
        SalaryLevel::Low
    } else if average_net_salary < Decimal::from(4000) {
        SalaryLevel::Medium
    } else if average_net_salary < Decimal::from(6000) {
        SalaryLevel::High
    } else {
        SalaryLevel::VeryHigh
    }
}

/// Buckets a local senior developer rate.
pub fn competitiveness(senior_rate: Decimal) -> Competitiveness {
    if senior_rate < Decimal::from(30) {
        Competitiveness::VeryCompetitive
    } else if senior_rate < Decimal::from(60) {
        Competitiveness::Competitive
    } else if senior_rate < Decimal::ONE_HUNDRED {
        Competitiveness::Moderate
    } else {
        Competitiveness::PremiumMarket
    }
}

/// Judges a city by its salary to cost-of-living ratio.
///
/// A non-positive cost of living cannot produce a ratio and is treated as a
/// premium market. A ratio beyond the `Decimal` range is excellent value.
pub fn recommendation(average_net_salary: Decimal, cost_of_living: Decimal) -> Recommendation {
    if cost_of_living <= Decimal::ZERO {
        return Recommendation::PremiumMarket;
    }

    let Some(ratio) = average_net_salary.checked_div(cost_of_living) else {
        return if average_net_salary > Decimal::ZERO {
            Recommendation::ExcellentValue
        } else {
            Recommendation::PremiumMarket
        };
    };
    if ratio > Decimal::new(25, 1) {
        Recommendation::ExcellentValue
    } else if ratio > Decimal::TWO {
        Recommendation::GoodValue
    } else if ratio > Decimal::new(15, 1) {
        Recommendation::ReasonableValue
    } else {
        Recommendation::PremiumMarket
    }
}

/// Builds every insight for a location record.
///
/// # Examples
///
/// ```
/// use freelance_rate_engine::calculation::{location_insights, CostLevel, Recommendation};
/// use freelance_rate_engine::models::{DeveloperRates, LocationCategory, LocationRecord};
/// use rust_decimal::Decimal;
///
/// let location = LocationRecord {
///     city: "Austin".to_string(),
///     country: "United States".to_string(),
///     state: Some("TX".to_string()),
///     cost_of_living: Decimal::from(2600),
///     purchasing_power_index: Decimal::from(135),
///     average_net_salary: Decimal::from(6200),
///     local_developer_rates: DeveloperRates::default(),
///     category: LocationCategory::TechHub,
/// };
///
/// let insights = location_insights(&location);
/// assert_eq!(insights.cost_level, CostLevel::Medium);
/// assert_eq!(insights.recommendation, Recommendation::GoodValue);
/// assert!(insights.competitiveness.is_none());
/// ```
pub fn location_insights(location: &LocationRecord) -> LocationInsights {
    let recommendation = recommendation(location.average_net_salary, location.cost_of_living);

    LocationInsights {
        cost_level: cost_level(location.cost_of_living),
        salary_level: salary_level(location.average_net_salary),
        competitiveness: location
            .local_developer_rates
            .usable(RateTier::Senior)
            .map(competitiveness),
        recommendation,
        recommendation_text: recommendation.description().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeveloperRates, LocationCategory};

    #[test]
    fn test_cost_level_boundaries() {
        assert_eq!(cost_level(Decimal::from(999)), CostLevel::VeryLow);
        assert_eq!(cost_level(Decimal::from(1000)), CostLevel::Low);
        assert_eq!(cost_level(Decimal::from(2999)), CostLevel::Medium);
        assert_eq!(cost_level(Decimal::from(3000)), CostLevel::High);
        assert_eq!(cost_level(Decimal::from(4000)), CostLevel::VeryHigh);
    }

    #[test]
    fn test_salary_level_boundaries() {
        assert_eq!(salary_level(Decimal::from(1999)), SalaryLevel::Low);
        assert_eq!(salary_level(Decimal::from(2000)), SalaryLevel::Medium);
        assert_eq!(salary_level(Decimal::from(5999)), SalaryLevel::High);
        assert_eq!(salary_level(Decimal::from(6000)), SalaryLevel::VeryHigh);
    }

    #[test]
    fn test_competitiveness_boundaries() {
        assert_eq!(competitiveness(Decimal::from(29)), Competitiveness::VeryCompetitive);
        assert_eq!(competitiveness(Decimal::from(30)), Competitiveness::Competitive);
        assert_eq!(competitiveness(Decimal::from(99)), Competitiveness::Moderate);
        assert_eq!(competitiveness(Decimal::from(100)), Competitiveness::PremiumMarket);
    }

    #[test]
    fn test_recommendation_by_ratio() {
        assert_eq!(
            recommendation(Decimal::from(2600), Decimal::from(1000)),
            Recommendation::ExcellentValue
        );
        assert_eq!(
            recommendation(Decimal::from(2500), Decimal::from(1000)),
            Recommendation::GoodValue
        );
        assert_eq!(
            recommendation(Decimal::from(1600), Decimal::from(1000)),
            Recommendation::ReasonableValue
        );
        assert_eq!(
            recommendation(Decimal::from(1500), Decimal::from(1000)),
            Recommendation::PremiumMarket
        );
        assert_eq!(
            recommendation(Decimal::from(1500), Decimal::ZERO),
            Recommendation::PremiumMarket
        );
        assert_eq!(
            recommendation(Decimal::MAX, Decimal::new(1, 10)),
            Recommendation::ExcellentValue
        );
    }

    #[test]
    fn test_location_insights_includes_competitiveness() {
        let location = LocationRecord {
            city: "Warsaw".to_string(),
            country: "Poland".to_string(),
            state: None,
            cost_of_living: Decimal::from(1500),
            purchasing_power_index: Decimal::from(70),
            average_net_salary: Decimal::from(1700),
            local_developer_rates: DeveloperRates {
                junior: Some(Decimal::from(18)),
                mid: Some(Decimal::from(28)),
                senior: Some(Decimal::from(40)),
            },
            category: LocationCategory::Capital,
        };

        let insights = location_insights(&location);

        assert_eq!(insights.cost_level, CostLevel::Low);
        assert_eq!(insights.salary_level, SalaryLevel::Low);
        assert_eq!(insights.competitiveness, Some(Competitiveness::Competitive));
        assert_eq!(insights.recommendation, Recommendation::PremiumMarket);
        assert!(insights.recommendation_text.starts_with("Premium market"));
    }
}
