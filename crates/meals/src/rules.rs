//! Per-goal nutrition bounds.

use crate::error::{MealError, Result};
use crate::goal::FitnessGoal;
use crate::model::NutritionEstimate;
use mealfinder_core::config::RuleOverride;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Whether a bound is a floor or a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Min,
    Max,
}

/// Nutrient a bound applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl Nutrient {
    /// Read this nutrient from an estimate.
    pub fn of(self, nutrition: &NutritionEstimate) -> f64 {
        match self {
            Nutrient::Calories => nutrition.calories,
            Nutrient::Protein => nutrition.protein_g,
            Nutrient::Carbs => nutrition.carbs_g,
            Nutrient::Fat => nutrition.fat_g,
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            _ => "g",
        }
    }
}

/// One present bound of a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub nutrient: Nutrient,
    pub kind: BoundKind,
    pub value: f64,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            BoundKind::Min => ">=",
            BoundKind::Max => "<=",
        };
        let name = match self.nutrient {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
        };
        write!(f, "{name} {op} {}{}", self.value, self.nutrient.unit())
    }
}

/// Sparse nutrition bounds for one goal. Absent bounds are unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fat: Option<f64>,
}

impl NutritionRule {
    /// Iterate the bounds that are set.
    pub fn bounds(&self) -> impl Iterator<Item = Bound> + '_ {
        [
            (Nutrient::Protein, BoundKind::Min, self.min_protein),
            (Nutrient::Calories, BoundKind::Max, self.max_calories),
            (Nutrient::Carbs, BoundKind::Max, self.max_carbs),
            (Nutrient::Fat, BoundKind::Min, self.min_fat),
            (Nutrient::Fat, BoundKind::Max, self.max_fat),
        ]
        .into_iter()
        .filter_map(|(nutrient, kind, value)| {
            value.map(|value| Bound {
                nutrient,
                kind,
                value,
            })
        })
    }

    /// True when no bound is set.
    pub fn is_unconstrained(&self) -> bool {
        self.bounds().next().is_none()
    }

    /// Replace every bound the override sets.
    #[must_use]
    pub fn apply(mut self, patch: &RuleOverride) -> Self {
        self.min_protein = patch.min_protein.or(self.min_protein);
        self.max_calories = patch.max_calories.or(self.max_calories);
        self.max_carbs = patch.max_carbs.or(self.max_carbs);
        self.min_fat = patch.min_fat.or(self.min_fat);
        self.max_fat = patch.max_fat.or(self.max_fat);
        self
    }

    fn check(&self) -> std::result::Result<(), String> {
        for bound in self.bounds() {
            if !bound.value.is_finite() || bound.value < 0.0 {
                return Err(format!("{bound} is not a non-negative number"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_fat, self.max_fat) {
            if min > max {
                return Err(format!("min_fat {min} exceeds max_fat {max}"));
            }
        }
        Ok(())
    }
}

static STANDARD_RULES: Lazy<NutritionRuleSet> = Lazy::new(|| NutritionRuleSet {
    rules: [
        NutritionRule {
            min_protein: Some(25.0),
            max_calories: Some(800.0),
            max_carbs: Some(60.0),
            ..NutritionRule::default()
        },
        NutritionRule {
            min_protein: Some(15.0),
            max_calories: Some(500.0),
            max_carbs: Some(40.0),
            ..NutritionRule::default()
        },
        NutritionRule {
            max_carbs: Some(20.0),
            min_fat: Some(30.0),
            ..NutritionRule::default()
        },
        NutritionRule {
            max_calories: Some(700.0),
            ..NutritionRule::default()
        },
    ],
});

/// One rule per goal, indexed by declaration order.
///
/// Built once and never mutated; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionRuleSet {
    rules: [NutritionRule; 4],
}

impl Default for NutritionRuleSet {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl NutritionRuleSet {
    /// The built-in rule table.
    pub fn standard() -> &'static NutritionRuleSet {
        &STANDARD_RULES
    }

    /// Standard rules with per-goal overrides applied.
    ///
    /// Keys are goal ids. Unknown ids and negative bounds are rejected.
    pub fn from_overrides(overrides: &BTreeMap<String, RuleOverride>) -> Result<Self> {
        let mut set = Self::default();
        for (id, patch) in overrides {
            let goal: FitnessGoal = id.parse()?;
            let rule = set.rules[goal.ordinal()].apply(patch);
            rule.check().map_err(|message| MealError::InvalidRule {
                goal: goal.id().to_string(),
                message,
            })?;
            set.rules[goal.ordinal()] = rule;
        }
        Ok(set)
    }

    /// Rule for `goal`. Total over the goal set.
    pub fn rules_for(&self, goal: FitnessGoal) -> &NutritionRule {
        &self.rules[goal.ordinal()]
    }

    /// `(goal, rule)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FitnessGoal, &NutritionRule)> {
        FitnessGoal::ALL.into_iter().zip(self.rules.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let rules = NutritionRuleSet::standard();

        let muscle = rules.rules_for(FitnessGoal::MuscleGain);
        assert_eq!(muscle.min_protein, Some(25.0));
        assert_eq!(muscle.max_calories, Some(800.0));
        assert_eq!(muscle.max_carbs, Some(60.0));
        assert_eq!(muscle.min_fat, None);

        let loss = rules.rules_for(FitnessGoal::WeightLoss);
        assert_eq!(loss.min_protein, Some(15.0));
        assert_eq!(loss.max_calories, Some(500.0));
        assert_eq!(loss.max_carbs, Some(40.0));

        let keto = rules.rules_for(FitnessGoal::Keto);
        assert_eq!(keto.max_carbs, Some(20.0));
        assert_eq!(keto.min_fat, Some(30.0));
        assert_eq!(keto.max_calories, None);

        let balanced = rules.rules_for(FitnessGoal::Balanced);
        assert_eq!(balanced.max_calories, Some(700.0));
        assert_eq!(balanced.bounds().count(), 1);
    }

    #[test]
    fn test_standard_bounds_non_negative() {
        for (_, rule) in NutritionRuleSet::standard().iter() {
            assert!(rule.bounds().all(|b| b.value >= 0.0));
        }
    }

    #[test]
    fn test_override_replaces_only_given_bounds() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "keto".to_string(),
            RuleOverride {
                max_fat: Some(70.0),
                max_carbs: Some(25.0),
                ..RuleOverride::default()
            },
        );

        let set = NutritionRuleSet::from_overrides(&overrides).unwrap();
        let keto = set.rules_for(FitnessGoal::Keto);
        assert_eq!(keto.max_fat, Some(70.0));
        assert_eq!(keto.max_carbs, Some(25.0));
        assert_eq!(keto.min_fat, Some(30.0));
        assert_eq!(
            set.rules_for(FitnessGoal::Balanced),
            NutritionRuleSet::standard().rules_for(FitnessGoal::Balanced)
        );
    }

    #[test]
    fn test_override_unknown_goal() {
        let mut overrides = BTreeMap::new();
        overrides.insert("paleo".to_string(), RuleOverride::default());
        assert!(matches!(
            NutritionRuleSet::from_overrides(&overrides),
            Err(MealError::UnknownGoal(_))
        ));
    }

    #[test]
    fn test_override_negative_bound() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "balanced".to_string(),
            RuleOverride {
                max_calories: Some(-1.0),
                ..RuleOverride::default()
            },
        );
        assert!(matches!(
            NutritionRuleSet::from_overrides(&overrides),
            Err(MealError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_override_inverted_fat_range() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "keto".to_string(),
            RuleOverride {
                max_fat: Some(10.0),
                ..RuleOverride::default()
            },
        );
        assert!(NutritionRuleSet::from_overrides(&overrides).is_err());
    }

    #[test]
    fn test_bound_display() {
        let bound = NutritionRuleSet::standard()
            .rules_for(FitnessGoal::Keto)
            .bounds()
            .next()
            .unwrap();
        assert_eq!(bound.to_string(), "carbs <= 20g");
    }
}
