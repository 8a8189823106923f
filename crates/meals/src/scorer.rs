//! Relevance scoring for a single meal.

use crate::goal::FitnessGoal;
use crate::model::{MealCandidate, NutritionEstimate, Preferences};
use crate::rules::{BoundKind, NutritionRule};
use mealfinder_core::config::ScoringConfig;
use serde::Serialize;

/// Calculate how well a meal suits a goal.
///
/// Implementations must be pure: the same inputs always give the same
/// score. Scores must be finite and within `0.0..=1.0`; use
/// [`MealScorer::sanitise`] to apply these guards. Exclusion filtering is
/// not a scorer concern, the ranking pipeline drops excluded meals first.
///
/// # Examples
///
/// ```rust
/// use mealfinder_meals::{FitnessGoal, MealCandidate, MealScorer, NutritionRule, Preferences};
///
/// struct Flat;
///
/// impl MealScorer for Flat {
///     fn score(&self, _: &MealCandidate, _: FitnessGoal, _: &NutritionRule, _: &Preferences) -> f64 {
///         Self::sanitise(1.5)
///     }
/// }
///
/// let meal = MealCandidate::new("Dig", "Bowl");
/// let score = Flat.score(&meal, FitnessGoal::Balanced, &NutritionRule::default(), &Preferences::new());
/// assert_eq!(score, 1.0);
/// ```
pub trait MealScorer: Send + Sync {
    /// Score `meal` for `goal` under `rule`.
    fn score(
        &self,
        meal: &MealCandidate,
        goal: FitnessGoal,
        rule: &NutritionRule,
        preferences: &Preferences,
    ) -> f64;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

/// Weights and decay parameters for [`WeightedScorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub nutrition: f64,
    pub cuisine: f64,
    pub flavor: f64,
    /// Relative distance outside a bound at which its credit reaches zero
    pub tolerance: f64,
    /// Nutrition fit used when a meal has no usable nutrition data
    pub missing_credit: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::from(&ScoringConfig::default())
    }
}

impl From<&ScoringConfig> for ScoringWeights {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            nutrition: config.nutrition_weight,
            cuisine: config.cuisine_weight,
            flavor: config.flavor_weight,
            tolerance: config.overage_tolerance,
            missing_credit: config.missing_nutrition_credit,
        }
    }
}

/// Components of a weighted score, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Nutrition fit in `[0, 1]`
    pub nutrition_fit: f64,
    /// Whether nutrition data was missing
    pub nutrition_missing: bool,
    pub cuisine_match: bool,
    pub flavor_match: bool,
    /// Final weighted, clamped score
    pub total: f64,
}

/// Weighted sum of nutrition fit, cuisine match and flavor match.
///
/// Nutrition fit is the mean credit over the rule's bounds. A bound gives
/// full credit when satisfied and decays linearly to zero as the value moves
/// `tolerance` (relative) past it.
#[derive(Debug, Clone, Default)]
pub struct WeightedScorer {
    weights: ScoringWeights,
}

impl WeightedScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Mean bound credit for known nutrition. A rule without bounds fits fully.
    pub fn nutrition_fit(&self, nutrition: &NutritionEstimate, rule: &NutritionRule) -> f64 {
        let (sum, count) = rule.bounds().fold((0.0, 0usize), |(sum, count), bound| {
            let value = bound.nutrient.of(nutrition);
            let credit = bound_credit(value, bound.value, bound.kind, self.weights.tolerance);
            (sum + credit, count + 1)
        });

        if count == 0 { 1.0 } else { sum / count as f64 }
    }

    /// Score with every component exposed.
    pub fn breakdown(
        &self,
        meal: &MealCandidate,
        rule: &NutritionRule,
        preferences: &Preferences,
    ) -> ScoreBreakdown {
        let (nutrition_fit, nutrition_missing) = match meal.usable_nutrition() {
            Some(nutrition) => (self.nutrition_fit(nutrition, rule), false),
            None => (self.weights.missing_credit, true),
        };
        let cuisine_match = labels_match(preferences.cuisine.as_deref(), meal.cuisine.as_deref());
        let flavor_match =
            labels_match(preferences.flavor_profile.as_deref(), meal.flavor_profile.as_deref());

        let raw = self.weights.nutrition * nutrition_fit
            + if cuisine_match { self.weights.cuisine } else { 0.0 }
            + if flavor_match { self.weights.flavor } else { 0.0 };

        ScoreBreakdown {
            nutrition_fit,
            nutrition_missing,
            cuisine_match,
            flavor_match,
            total: Self::sanitise(raw),
        }
    }
}

impl MealScorer for WeightedScorer {
    fn score(
        &self,
        meal: &MealCandidate,
        _goal: FitnessGoal,
        rule: &NutritionRule,
        preferences: &Preferences,
    ) -> f64 {
        self.breakdown(meal, rule, preferences).total
    }
}

fn bound_credit(value: f64, limit: f64, kind: BoundKind, tolerance: f64) -> f64 {
    let miss = match kind {
        BoundKind::Max if value <= limit => return 1.0,
        BoundKind::Min if value >= limit => return 1.0,
        BoundKind::Max => value - limit,
        BoundKind::Min => limit - value,
    };
    if limit <= 0.0 || tolerance <= 0.0 {
        return 0.0;
    }
    (1.0 - miss / limit / tolerance).max(0.0)
}

fn labels_match(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted.map(str::trim), actual.map(str::trim)) {
        (Some(w), Some(a)) if !w.is_empty() => w.to_lowercase() == a.to_lowercase(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::NutritionRuleSet;

    fn scorer() -> WeightedScorer {
        WeightedScorer::default()
    }

    fn muscle_rule() -> &'static NutritionRule {
        NutritionRuleSet::standard().rules_for(FitnessGoal::MuscleGain)
    }

    fn meal(calories: f64, protein: f64, carbs: f64, fat: f64) -> MealCandidate {
        MealCandidate::new("Test Kitchen", "Plate")
            .with_nutrition(NutritionEstimate::new(calories, protein, carbs, fat))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_in_bounds_meal_gets_full_fit() {
        let s = scorer();
        let m = meal(485.0, 34.0, 29.0, 21.0);
        let b = s.breakdown(&m, muscle_rule(), &Preferences::new());
        assert!(close(b.nutrition_fit, 1.0));
        assert!(close(b.total, 0.7));
    }

    #[test]
    fn test_out_of_bounds_meal_decays() {
        let s = scorer();
        let m = meal(1200.0, 10.0, 66.0, 40.0);
        let b = s.breakdown(&m, muscle_rule(), &Preferences::new());
        // protein 60% short and calories 50% over both hit zero; carbs 10% over gives 0.8
        assert!(close(b.nutrition_fit, 0.8 / 3.0));
    }

    #[test]
    fn test_missing_nutrition_is_neutral() {
        let s = scorer();
        let m = MealCandidate::new("Test Kitchen", "Mystery Plate");
        let b = s.breakdown(&m, muscle_rule(), &Preferences::new());
        assert!(b.nutrition_missing);
        assert!(b.total > 0.0 && b.total < 0.7);
        assert!(close(b.total, 0.35));
    }

    #[test]
    fn test_invalid_nutrition_treated_as_missing() {
        let s = scorer();
        let m = meal(-5.0, 30.0, 10.0, 10.0);
        assert!(s.breakdown(&m, muscle_rule(), &Preferences::new()).nutrition_missing);
    }

    #[test]
    fn test_rule_without_bounds_fits_fully() {
        let s = scorer();
        let fit = s.nutrition_fit(
            &NutritionEstimate::new(2000.0, 0.0, 300.0, 100.0),
            &NutritionRule::default(),
        );
        assert!(close(fit, 1.0));
    }

    #[test]
    fn test_zero_max_bound() {
        assert!(close(bound_credit(0.0, 0.0, BoundKind::Max, 0.5), 1.0));
        assert!(close(bound_credit(1.0, 0.0, BoundKind::Max, 0.5), 0.0));
        assert!(close(bound_credit(0.0, 0.0, BoundKind::Min, 0.5), 1.0));
    }

    #[test]
    fn test_preference_bonuses() {
        let s = scorer();
        let m = meal(485.0, 34.0, 29.0, 21.0)
            .with_cuisine("Mediterranean")
            .with_flavor("Savory");
        let prefs = Preferences::new()
            .with_cuisine("  mediterranean ")
            .with_flavor("SAVORY");
        let b = s.breakdown(&m, muscle_rule(), &prefs);
        assert!(b.cuisine_match && b.flavor_match);
        assert!(close(b.total, 1.0));
    }

    #[test]
    fn test_preference_without_meal_label_gives_nothing() {
        let s = scorer();
        let m = meal(485.0, 34.0, 29.0, 21.0);
        let prefs = Preferences::new().with_cuisine("thai");
        let b = s.breakdown(&m, muscle_rule(), &prefs);
        assert!(!b.cuisine_match);
        assert!(close(b.total, 0.7));
    }

    #[test]
    fn test_score_is_deterministic() {
        let s = scorer();
        let m = meal(735.0, 42.0, 60.0, 30.0).with_cuisine("Mexican");
        let prefs = Preferences::new().with_cuisine("mexican");
        let first = s.score(&m, FitnessGoal::MuscleGain, muscle_rule(), &prefs);
        for _ in 0..10 {
            assert_eq!(s.score(&m, FitnessGoal::MuscleGain, muscle_rule(), &prefs), first);
        }
    }

    #[test]
    fn test_sanitise() {
        assert_eq!(WeightedScorer::sanitise(f64::NAN), 0.0);
        assert_eq!(WeightedScorer::sanitise(-0.2), 0.0);
        assert_eq!(WeightedScorer::sanitise(1.7), 1.0);
        assert_eq!(WeightedScorer::sanitise(0.42), 0.42);
    }
}
