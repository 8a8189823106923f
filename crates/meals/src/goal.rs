//! The closed set of fitness goals and their phrase catalog.

use crate::error::MealError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A canonical fitness goal.
///
/// Declaration order matters: it breaks ties during matching and orders
/// suggestions with equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    /// High protein, moderate calories
    MuscleGain,
    /// Lower calories, moderate protein
    WeightLoss,
    /// Low carbs, high fat
    Keto,
    /// General healthy eating
    Balanced,
}

impl FitnessGoal {
    /// All goals in declaration order.
    pub const ALL: [FitnessGoal; 4] = [
        FitnessGoal::MuscleGain,
        FitnessGoal::WeightLoss,
        FitnessGoal::Keto,
        FitnessGoal::Balanced,
    ];

    /// Stable snake_case identifier.
    pub const fn id(self) -> &'static str {
        match self {
            FitnessGoal::MuscleGain => "muscle_gain",
            FitnessGoal::WeightLoss => "weight_loss",
            FitnessGoal::Keto => "keto",
            FitnessGoal::Balanced => "balanced",
        }
    }

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::Keto => "Ketogenic Diet",
            FitnessGoal::Balanced => "Balanced Diet",
        }
    }

    /// One-line description of what the goal optimizes for.
    pub const fn description(self) -> &'static str {
        match self {
            FitnessGoal::MuscleGain => "High protein, moderate calories for muscle building",
            FitnessGoal::WeightLoss => "Lower calories, moderate protein for weight loss",
            FitnessGoal::Keto => "Low carbs, high fat for ketosis",
            FitnessGoal::Balanced => "General healthy eating guidelines",
        }
    }

    /// Phrases users type for this goal, including common misspellings.
    pub const fn synonyms(self) -> &'static [&'static str] {
        match self {
            FitnessGoal::MuscleGain => MUSCLE_GAIN_SYNONYMS,
            FitnessGoal::WeightLoss => WEIGHT_LOSS_SYNONYMS,
            FitnessGoal::Keto => KETO_SYNONYMS,
            FitnessGoal::Balanced => BALANCED_SYNONYMS,
        }
    }

    /// Position in [`FitnessGoal::ALL`].
    pub const fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FitnessGoal {
    type Err = MealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        FitnessGoal::ALL
            .into_iter()
            .find(|goal| goal.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| MealError::UnknownGoal(id.to_string()))
    }
}

const MUSCLE_GAIN_SYNONYMS: &[&str] = &[
    "muscle gain",
    "musle gain",
    "muscle building",
    "musle building",
    "bulk",
    "bulking",
    "lean bulk",
    "lean bulking",
    "muscle growth",
    "musle growth",
    "gain muscle",
    "gain musle",
    "build muscle",
    "build musle",
    "muscle development",
    "musle development",
    "strength training",
    "powerlifting",
    "bodybuilding",
    "body building",
    "muscle mass",
    "musle mass",
    "gain weight",
    "put on muscle",
    "put on musle",
    "get bigger",
    "get stronger",
    "size gains",
    "muscle hypertrophy",
    "musle hypertrophy",
    "mass building",
    "muscle gainer",
    "musle gainer",
    "bulk up",
    "bulkup",
    "muscle up",
    "musle up",
];

const WEIGHT_LOSS_SYNONYMS: &[&str] = &[
    "weight loss",
    "weightloss",
    "lose weight",
    "loose weight",
    "fat loss",
    "fatloss",
    "burn fat",
    "burning fat",
    "slim down",
    "slimdown",
    "get lean",
    "getlean",
    "cut",
    "cutting",
    "diet",
    "dieting",
    "calorie deficit",
    "calorie defecit",
    "weight reduction",
    "shed pounds",
    "shedpounds",
    "drop weight",
    "dropweight",
    "lose fat",
    "loose fat",
    "fat burning",
    "fatburning",
    "weight management",
    "weightmanagement",
    "slimming",
    "slimming down",
    "get skinny",
    "getskinny",
    "reduce weight",
    "reduceweight",
    "lose pounds",
    "loose pounds",
];

const KETO_SYNONYMS: &[&str] = &[
    "keto",
    "ketogenic",
    "ketogenic diet",
    "keto diet",
    "ketodiet",
    "low carb",
    "lowcarb",
    "low carbohydrate",
    "lowcarbohydrate",
    "ketosis",
    "keto lifestyle",
    "keto eating",
    "keto plan",
    "keto meal",
    "keto food",
    "keto nutrition",
    "keto diet plan",
    "keto meal plan",
    "keto dieting",
    "keto eating plan",
    "keto nutrition plan",
];

const BALANCED_SYNONYMS: &[&str] = &[
    "balanced",
    "balanced diet",
    "balanceddiet",
    "healthy eating",
    "healthyeating",
    "healthy diet",
    "healthydiet",
    "maintenance",
    "maintain",
    "maintaining",
    "general health",
    "generalhealth",
    "overall health",
    "overallhealth",
    "wellness",
    "healthy lifestyle",
    "healthylifestyle",
    "balanced nutrition",
    "balancednutrition",
    "healthy nutrition",
    "healthynutrition",
    "moderate diet",
    "moderatediet",
    "sustainable diet",
    "sustainablediet",
    "long term health",
    "longtermhealth",
    "healthy living",
    "healthyliving",
    "balanced eating",
    "balancedeating",
    "healthy food",
    "healthyfood",
    "nutrition",
    "good nutrition",
    "goodnutrition",
    "proper nutrition",
    "propernutrition",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_round_trip() {
        for goal in FitnessGoal::ALL {
            assert_eq!(goal.id().parse::<FitnessGoal>().unwrap(), goal);
        }
        assert!(matches!(
            "paleo".parse::<FitnessGoal>(),
            Err(MealError::UnknownGoal(_))
        ));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&FitnessGoal::MuscleGain).unwrap();
        assert_eq!(json, "\"muscle_gain\"");
        let goal: FitnessGoal = serde_json::from_str("\"weight_loss\"").unwrap();
        assert_eq!(goal, FitnessGoal::WeightLoss);
    }

    #[test]
    fn test_ordinal_matches_all() {
        for (i, goal) in FitnessGoal::ALL.iter().enumerate() {
            assert_eq!(goal.ordinal(), i);
        }
    }

    #[test]
    fn test_synonyms_are_unique_across_goals() {
        let mut seen = HashSet::new();
        for goal in FitnessGoal::ALL {
            for phrase in goal.synonyms() {
                assert!(seen.insert(*phrase), "duplicate synonym {phrase}");
            }
        }
    }
}
