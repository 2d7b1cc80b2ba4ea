use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Content domain of a plan. Drives schema, example and template lookup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PlanCategory {
    Diet,
    Fitness,
    Skincare,
    Recovery,
    Wellness,
}

impl PlanCategory {
    /// Every category, in declaration order.
    pub const ALL: [PlanCategory; 5] = [
        PlanCategory::Diet,
        PlanCategory::Fitness,
        PlanCategory::Skincare,
        PlanCategory::Recovery,
        PlanCategory::Wellness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanCategory::Diet => "diet",
            PlanCategory::Fitness => "fitness",
            PlanCategory::Skincare => "skincare",
            PlanCategory::Recovery => "recovery",
            PlanCategory::Wellness => "wellness",
        }
    }

    /// Title-case label used in headings and fallback titles.
    pub fn label(&self) -> &'static str {
        match self {
            PlanCategory::Diet => "Diet",
            PlanCategory::Fitness => "Fitness",
            PlanCategory::Skincare => "Skincare",
            PlanCategory::Recovery => "Recovery",
            PlanCategory::Wellness => "Wellness",
        }
    }
}

impl fmt::Display for PlanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanCategory {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        PlanCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| Error::UnknownCategory(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Skincare".parse::<PlanCategory>().unwrap(), PlanCategory::Skincare);
        assert_eq!(" diet ".parse::<PlanCategory>().unwrap(), PlanCategory::Diet);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "yoga".parse::<PlanCategory>().unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(name) if name == "yoga"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for category in PlanCategory::ALL {
            assert_eq!(category.to_string().parse::<PlanCategory>().unwrap(), category);
        }
    }
}
