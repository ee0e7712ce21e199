//! Experience level model.

use serde::{Deserialize, Serialize};

use super::RateTier;

/// A freelancer's experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Early-career.
    Junior,
    /// Mid-level.
    #[default]
    Pleno,
    /// Senior.
    Senior,
    /// Specialist, compared against senior market data.
    Specialist,
}

impl ExperienceLevel {
    /// Maps the level onto the tier used by local developer rate data.
    ///
    /// # Examples
    ///
    /// ```
    /// use freelance_rate_engine::models::{ExperienceLevel, RateTier};
    ///
    /// assert_eq!(ExperienceLevel::Pleno.rate_tier(), RateTier::Mid);
    /// assert_eq!(ExperienceLevel::Specialist.rate_tier(), RateTier::Senior);
    /// ```
    pub fn rate_tier(&self) -> RateTier {
        match self {
            ExperienceLevel::Junior => RateTier::Junior,
            ExperienceLevel::Pleno => RateTier::Mid,
            ExperienceLevel::Senior | ExperienceLevel::Specialist => RateTier::Senior,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_tier_mapping() {
        assert_eq!(ExperienceLevel::Junior.rate_tier(), RateTier::Junior);
        assert_eq!(ExperienceLevel::Pleno.rate_tier(), RateTier::Mid);
        assert_eq!(ExperienceLevel::Senior.rate_tier(), RateTier::Senior);
        assert_eq!(ExperienceLevel::Specialist.rate_tier(), RateTier::Senior);
    }

    #[test]
    fn test_experience_level_serde() {
        let level: ExperienceLevel = serde_json::from_str("\"specialist\"").unwrap();
        assert_eq!(level, ExperienceLevel::Specialist);
        assert_eq!(serde_json::to_string(&ExperienceLevel::Pleno).unwrap(), "\"pleno\"");
    }
}
