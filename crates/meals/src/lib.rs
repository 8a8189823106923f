//! Meal recommendation core for mealfinder.
//!
//! This crate provides:
//! - **Goal matching**: fuzzy resolution of free text ("lean bulk",
//!   "musle gain") to a canonical [`FitnessGoal`] with confidence
//! - **Nutrition rules**: per-goal nutrition bounds, overridable from config
//! - **Scoring**: a [`MealScorer`] trait and the default [`WeightedScorer`]
//! - **Ranking**: [`RankingPipeline`] filters, scores, sorts and truncates
//! - **Ingestion helpers**: menu text parsing, nutrition estimation, goal
//!   inference, free-form query parsing and distance annotation
//!
//! # Example
//!
//! ```
//! use mealfinder_meals::{sample_meals, GoalMatcher, Preferences, RankingPipeline};
//!
//! let goal = GoalMatcher::new().match_goal("lean bulk").unwrap().matched_goal;
//! let ranked = RankingPipeline::default()
//!     .rank(&sample_meals(), goal, &Preferences::new().exclude("steak"), 3)
//!     .unwrap();
//!
//! assert_eq!(ranked.len(), 3);
//! assert!(ranked.iter().all(|m| m.candidate.dish_name != "Steak"));
//! ```
//!
//! # Features
//!
//! - `parallel` (default): score candidates on the rayon thread pool

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod catalog;
mod distance;
mod error;
mod estimate;
mod goal;
mod inference;
mod matcher;
mod menu;
mod model;
mod query;
mod ranking;
mod rules;
mod scorer;

pub use catalog::sample_meals;
pub use distance::annotate_distances;
pub use error::{MealError, MealErrorCode, Result};
pub use estimate::{estimate_nutrition, validate_estimate};
pub use goal::FitnessGoal;
pub use inference::{infer_goal, infer_goal_from_text, GoalInference};
pub use matcher::{ConfidenceLevel, GoalMatchResult, GoalMatcher, GoalSuggestion, MatcherSettings};
pub use menu::{parse_price, MenuParser};
pub use model::{MealCandidate, NutritionEstimate, Preferences, ScoredMeal};
pub use query::{parse_query, DietaryPreference, MealType, QueryFilters};
pub use ranking::RankingPipeline;
pub use rules::{Bound, BoundKind, Nutrient, NutritionRule, NutritionRuleSet};
pub use scorer::{MealScorer, ScoreBreakdown, ScoringWeights, WeightedScorer};
