//! Keyword heuristic guessing which goal a dish suits.

use crate::goal::FitnessGoal;
use crate::model::MealCandidate;
use serde::{Deserialize, Serialize};

/// The goal a dish appears to suit, with a rough confidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalInference {
    pub goal: FitnessGoal,
    /// 0-100
    pub confidence: u8,
    pub explanation: String,
}

// Checked in order; first hit wins.
const INFERENCE_RULES: &[(FitnessGoal, u8, &[&str], &str)] = &[
    (
        FitnessGoal::MuscleGain,
        70,
        &["chicken", "beef", "steak", "protein", "muscle", "gain", "bulk"],
        "High protein or muscle-building keywords detected",
    ),
    (
        FitnessGoal::Keto,
        70,
        &["keto", "bacon", "avocado", "fat", "low carb", "ketogenic"],
        "Low-carb or high-fat keywords detected",
    ),
    (
        FitnessGoal::WeightLoss,
        65,
        &["salad", "light", "low calorie", "weight loss", "slim", "cutting"],
        "Low-calorie or weight loss keywords detected",
    ),
];

/// Infer a goal from free text describing a dish.
pub fn infer_goal_from_text(text: &str) -> GoalInference {
    let text = text.to_lowercase();
    INFERENCE_RULES
        .iter()
        .find(|(_, _, keywords, _)| keywords.iter().any(|kw| text.contains(kw)))
        .map_or_else(
            || GoalInference {
                goal: FitnessGoal::Balanced,
                confidence: 60,
                explanation: "No strong indicators; defaulting to balanced".to_string(),
            },
            |(goal, confidence, _, explanation)| GoalInference {
                goal: *goal,
                confidence: *confidence,
                explanation: (*explanation).to_string(),
            },
        )
}

/// Infer a goal from a candidate's dish name and description.
pub fn infer_goal(meal: &MealCandidate) -> GoalInference {
    infer_goal_from_text(&format!("{}: {}", meal.dish_name, meal.description))
}
