//! User preference types.
//!
//! A PreferenceProfile captures everything a user tells us about what they
//! want: taste targets on the 1-5 scale, an optional budget ceiling, allowed
//! categories, and their experience level with sake.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How experienced the user is with sake.
///
/// An absent level is a distinct "unspecified" state, not beginner: the
/// experience scorer gives unspecified profiles a flat neutral score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for ExperienceLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(EngineError::Validation(format!(
                "unknown experience level: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        write!(f, "{}", s)
    }
}

fn default_taste_value() -> u8 {
    3
}

/// What the user asked for. Built once per request, immutable while scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Preferred sweetness, 1 (dry) to 5 (sweet)
    #[serde(default = "default_taste_value")]
    pub sweetness: u8,
    /// Preferred acidity, 1-5
    #[serde(default = "default_taste_value")]
    pub acidity: u8,
    /// Preferred richness, 1 (light) to 5 (rich)
    #[serde(default = "default_taste_value")]
    pub richness: u8,
    /// Maximum price in yen, if the user set one
    #[serde(default)]
    pub budget: Option<u32>,
    /// Allowed category tags; empty means no restriction
    #[serde(default)]
    pub categories: HashSet<String>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            sweetness: 3,
            acidity: 3,
            richness: 3,
            budget: None,
            categories: HashSet::new(),
            experience_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_from_empty_json() {
        let profile: PreferenceProfile = serde_json::from_str("{}").unwrap();

        assert_eq!(profile.sweetness, 3);
        assert_eq!(profile.acidity, 3);
        assert_eq!(profile.richness, 3);
        assert!(profile.budget.is_none());
        assert!(profile.categories.is_empty());
        assert!(profile.experience_level.is_none());
    }

    #[test]
    fn test_profile_from_partial_json() {
        let json = r#"{
            "sweetness": 2,
            "budget": 3000,
            "categories": ["junmai", "honjozo"],
            "experience_level": "beginner"
        }"#;
        let profile: PreferenceProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.sweetness, 2);
        assert_eq!(profile.acidity, 3);
        assert_eq!(profile.budget, Some(3000));
        assert_eq!(profile.categories.len(), 2);
        assert_eq!(profile.experience_level, Some(ExperienceLevel::Beginner));
    }

    #[test]
    fn test_experience_level_from_str() {
        assert_eq!(
            "advanced".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::Advanced
        );
        assert!("expert".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn test_experience_level_display_round_trip() {
        for level in [
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ] {
            let parsed: ExperienceLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }
}
