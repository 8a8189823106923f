//! Filter, score, sort and truncate meal candidates.

use crate::error::{MealError, Result};
use crate::goal::FitnessGoal;
use crate::model::{MealCandidate, Preferences, ScoredMeal};
use crate::rules::{NutritionRule, NutritionRuleSet};
use crate::scorer::{MealScorer, ScoringWeights, WeightedScorer};
use mealfinder_core::config::ConfigSchema;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Ranks candidates for a goal.
///
/// Holds only immutable state, so one pipeline can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct RankingPipeline<S = WeightedScorer> {
    rules: Arc<NutritionRuleSet>,
    scorer: S,
    require_results: bool,
    max_distance_miles: Option<f64>,
}

impl Default for RankingPipeline {
    fn default() -> Self {
        Self::new(Arc::new(NutritionRuleSet::default()))
    }
}

impl RankingPipeline {
    /// Pipeline with the default weighted scorer.
    pub fn new(rules: Arc<NutritionRuleSet>) -> Self {
        Self {
            rules,
            scorer: WeightedScorer::default(),
            require_results: false,
            max_distance_miles: None,
        }
    }

    /// Pipeline configured from the `[rules]`, `[scoring]` and `[ranking]`
    /// sections.
    pub fn from_config(config: &ConfigSchema) -> Result<Self> {
        let rules = NutritionRuleSet::from_overrides(&config.rules)?;
        Ok(Self {
            rules: Arc::new(rules),
            scorer: WeightedScorer::new(ScoringWeights::from(&config.scoring)),
            require_results: config.ranking.require_results,
            max_distance_miles: config.ranking.max_distance_miles,
        })
    }
}

impl<S: MealScorer> RankingPipeline<S> {
    /// Swap the scorer, keeping every other setting.
    pub fn with_scorer<T: MealScorer>(self, scorer: T) -> RankingPipeline<T> {
        RankingPipeline {
            rules: self.rules,
            scorer,
            require_results: self.require_results,
            max_distance_miles: self.max_distance_miles,
        }
    }

    /// Fail with [`MealError::EmptyCandidateSet`] instead of returning an
    /// empty list when filtering removes everything.
    #[must_use]
    pub fn require_results(mut self, require: bool) -> Self {
        self.require_results = require;
        self
    }

    /// Distance cap used when the preferences do not set one.
    #[must_use]
    pub fn with_max_distance(mut self, miles: Option<f64>) -> Self {
        self.max_distance_miles = miles;
        self
    }

    pub fn rules(&self) -> &NutritionRuleSet {
        &self.rules
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Rank `candidates` for `goal`, best first, at most `limit` meals.
    ///
    /// Equal scores keep their input order. Excluded and out-of-range meals
    /// are dropped before scoring.
    pub fn rank(
        &self,
        candidates: &[MealCandidate],
        goal: FitnessGoal,
        preferences: &Preferences,
        limit: usize,
    ) -> Result<Vec<ScoredMeal>> {
        let survivors = self.filter(candidates, preferences, limit)?;
        if survivors.is_empty() {
            return Ok(Vec::new());
        }

        let rule = self.rules.rules_for(goal);
        let scores = self.score_all(&survivors, goal, rule, preferences);

        let mut order: Vec<usize> = (0..survivors.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order.truncate(limit);

        let ranked: Vec<ScoredMeal> = order
            .into_iter()
            .map(|i| ScoredMeal {
                candidate: survivors[i].clone(),
                relevance_score: scores[i],
                matched_goal: goal,
            })
            .collect();

        info!(
            goal = %goal,
            candidates = candidates.len(),
            scored = survivors.len(),
            returned = ranked.len(),
            top_score = ranked.first().map(|m| m.relevance_score),
            "Ranked meals"
        );

        Ok(ranked)
    }

    /// Rank for several goals at once.
    ///
    /// Each meal is scored under every goal and keeps its best score (the
    /// earlier goal wins ties). Meals sharing a dish name are collapsed to
    /// the highest-ranked one.
    pub fn rank_many(
        &self,
        candidates: &[MealCandidate],
        goals: &[FitnessGoal],
        preferences: &Preferences,
        limit: usize,
    ) -> Result<Vec<ScoredMeal>> {
        let mut unique_goals: Vec<FitnessGoal> = Vec::with_capacity(goals.len());
        for goal in goals {
            if !unique_goals.contains(goal) {
                unique_goals.push(*goal);
            }
        }
        let Some(&first_goal) = unique_goals.first() else {
            return Err(MealError::InvalidInput(
                "at least one goal is required".to_string(),
            ));
        };

        let survivors = self.filter(candidates, preferences, limit)?;
        if survivors.is_empty() {
            return Ok(Vec::new());
        }

        let mut best: Vec<(f64, FitnessGoal)> = vec![(f64::NEG_INFINITY, first_goal); survivors.len()];
        for goal in &unique_goals {
            let scores = self.score_all(&survivors, *goal, self.rules.rules_for(*goal), preferences);
            for (slot, score) in best.iter_mut().zip(scores) {
                if score > slot.0 {
                    *slot = (score, *goal);
                }
            }
        }

        let mut order: Vec<usize> = (0..survivors.len()).collect();
        order.sort_by(|&a, &b| best[b].0.total_cmp(&best[a].0));

        let mut seen = HashSet::new();
        let ranked: Vec<ScoredMeal> = order
            .into_iter()
            .filter(|&i| seen.insert(survivors[i].dish_name.trim().to_lowercase()))
            .take(limit)
            .map(|i| ScoredMeal {
                candidate: survivors[i].clone(),
                relevance_score: best[i].0,
                matched_goal: best[i].1,
            })
            .collect();

        info!(
            goals = ?unique_goals.iter().map(|g| g.id()).collect::<Vec<_>>(),
            candidates = candidates.len(),
            returned = ranked.len(),
            "Ranked meals for multiple goals"
        );

        Ok(ranked)
    }

    fn filter<'a>(
        &self,
        candidates: &'a [MealCandidate],
        preferences: &Preferences,
        limit: usize,
    ) -> Result<Vec<&'a MealCandidate>> {
        if limit == 0 {
            return Err(MealError::InvalidInput("limit must be at least 1".to_string()));
        }
        let max_distance = preferences.max_distance_miles.or(self.max_distance_miles);
        if let Some(max) = max_distance {
            if !max.is_finite() || max < 0.0 {
                return Err(MealError::InvalidInput(format!(
                    "max distance must be a non-negative number, got {max}"
                )));
            }
        }

        let survivors: Vec<&MealCandidate> = candidates
            .iter()
            .filter(|meal| !preferences.excludes(meal))
            .filter(|meal| Preferences::within_distance(meal, max_distance))
            .collect();

        debug!(
            total = candidates.len(),
            kept = survivors.len(),
            excluded_terms = preferences.exclude_ingredients.len(),
            max_distance_miles = max_distance,
            "Filtered candidates"
        );

        if survivors.is_empty() {
            if self.require_results {
                return Err(MealError::EmptyCandidateSet {
                    total: candidates.len(),
                });
            }
            info!(total = candidates.len(), "No candidates left after filtering");
        }

        Ok(survivors)
    }

    fn score_all(
        &self,
        meals: &[&MealCandidate],
        goal: FitnessGoal,
        rule: &NutritionRule,
        preferences: &Preferences,
    ) -> Vec<f64> {
        let score = |meal: &&MealCandidate| S::sanitise(self.scorer.score(meal, goal, rule, preferences));

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            meals.par_iter().map(score).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            meals.iter().map(score).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NutritionEstimate;

    fn meal(dish: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> MealCandidate {
        MealCandidate::new("Test Kitchen", dish)
            .with_nutrition(NutritionEstimate::new(calories, protein, carbs, fat))
    }

    fn pipeline() -> RankingPipeline {
        RankingPipeline::default()
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = pipeline()
            .rank(&[], FitnessGoal::Keto, &Preferences::new(), 0)
            .unwrap_err();
        assert!(matches!(err, MealError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_input_returns_empty() {
        let ranked = pipeline()
            .rank(&[], FitnessGoal::Keto, &Preferences::new(), 5)
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_strict_mode_fails_when_everything_filtered() {
        let meals = [meal("Peanut Noodles", 500.0, 20.0, 60.0, 20.0)];
        let prefs = Preferences::new().exclude("peanut");
        let err = pipeline()
            .require_results(true)
            .rank(&meals, FitnessGoal::Balanced, &prefs, 5)
            .unwrap_err();
        assert!(matches!(err, MealError::EmptyCandidateSet { total: 1 }));
    }

    #[test]
    fn test_sorted_and_truncated() {
        let meals = [
            meal("Fried Platter", 1200.0, 10.0, 66.0, 60.0),
            meal("Chicken Bowl", 485.0, 34.0, 29.0, 21.0),
            meal("Pasta", 750.0, 20.0, 90.0, 20.0),
        ];
        let ranked = pipeline()
            .rank(&meals, FitnessGoal::MuscleGain, &Preferences::new(), 2)
            .unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate.dish_name, "Chicken Bowl");
        assert!(ranked[0].relevance_score >= ranked[1].relevance_score);
        assert!(ranked.iter().all(|m| m.matched_goal == FitnessGoal::MuscleGain));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let meals = [
            MealCandidate::new("A", "First"),
            MealCandidate::new("B", "Second"),
            MealCandidate::new("C", "Third"),
        ];
        let ranked = pipeline()
            .rank(&meals, FitnessGoal::Balanced, &Preferences::new(), 10)
            .unwrap();
        let names: Vec<_> = ranked.iter().map(|m| m.candidate.dish_name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_distance_filter() {
        let meals = [
            meal("Near", 500.0, 30.0, 20.0, 10.0).with_distance(0.8),
            meal("Far", 500.0, 30.0, 20.0, 10.0).with_distance(6.0),
            meal("Unknown", 500.0, 30.0, 20.0, 10.0),
        ];
        let prefs = Preferences::new().with_max_distance(2.0);
        let ranked = pipeline()
            .rank(&meals, FitnessGoal::Balanced, &prefs, 10)
            .unwrap();
        let names: Vec<_> = ranked.iter().map(|m| m.candidate.dish_name.as_str()).collect();
        assert_eq!(names, ["Near", "Unknown"]);
    }

    #[test]
    fn test_pipeline_distance_default_applies() {
        let meals = [meal("Far", 500.0, 30.0, 20.0, 10.0).with_distance(6.0)];
        let ranked = pipeline()
            .with_max_distance(Some(5.0))
            .rank(&meals, FitnessGoal::Balanced, &Preferences::new(), 10)
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_negative_distance_rejected() {
        let prefs = Preferences::new().with_max_distance(-1.0);
        assert!(pipeline()
            .rank(&[], FitnessGoal::Balanced, &prefs, 10)
            .is_err());
    }

    #[test]
    fn test_custom_scorer_is_sanitised() {
        struct Wild;
        impl MealScorer for Wild {
            fn score(&self, meal: &MealCandidate, _: FitnessGoal, _: &NutritionRule, _: &Preferences) -> f64 {
                if meal.dish_name == "nan" { f64::NAN } else { 7.0 }
            }
        }

        let meals = [MealCandidate::new("A", "nan"), MealCandidate::new("B", "big")];
        let ranked = pipeline()
            .with_scorer(Wild)
            .rank(&meals, FitnessGoal::Keto, &Preferences::new(), 10)
            .unwrap();
        assert_eq!(ranked[0].candidate.dish_name, "big");
        assert_eq!(ranked[0].relevance_score, 1.0);
        assert_eq!(ranked[1].relevance_score, 0.0);
    }

    #[test]
    fn test_rank_many_keeps_best_goal_and_dedupes() {
        let meals = [
            meal("Keto Caesar", 400.0, 30.0, 12.0, 35.0),
            meal("Chicken Bowl", 485.0, 34.0, 29.0, 21.0),
            meal("chicken bowl ", 485.0, 34.0, 29.0, 21.0).with_distance(3.0),
        ];
        let ranked = pipeline()
            .rank_many(
                &meals,
                &[FitnessGoal::MuscleGain, FitnessGoal::Keto, FitnessGoal::Keto],
                &Preferences::new(),
                10,
            )
            .unwrap();

        assert_eq!(ranked.len(), 2);
        let caesar = ranked
            .iter()
            .find(|m| m.candidate.dish_name == "Keto Caesar")
            .unwrap();
        // fits both rules fully; muscle gain is declared first
        assert_eq!(caesar.matched_goal, FitnessGoal::MuscleGain);
        assert!(ranked.iter().all(|m| m.relevance_score > 0.0));
    }

    #[test]
    fn test_rank_many_requires_goal() {
        assert!(matches!(
            pipeline().rank_many(&[], &[], &Preferences::new(), 3),
            Err(MealError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_config_applies_overrides() {
        let config = mealfinder_core::config::Config::from_toml_str(
            r#"
[ranking]
require_results = true

[rules.balanced]
max_calories = 400
"#,
        )
        .unwrap();
        let pipeline = RankingPipeline::from_config(&config.schema).unwrap();
        assert_eq!(
            pipeline.rules().rules_for(FitnessGoal::Balanced).max_calories,
            Some(400.0)
        );
        assert!(pipeline.rank(&[], FitnessGoal::Balanced, &Preferences::new(), 1).is_err());
    }
}
