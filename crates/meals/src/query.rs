//! Free-form search query parsing.
//!
//! Turns text like `"high protein lunch near me under 600 calories"` into
//! structured filters. Keywords are matched on whole words, so `"brunch"`
//! is not mistaken for `"lunch"`.

use crate::goal::FitnessGoal;
use crate::model::MealCandidate;
use mealfinder_search::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static CALORIE_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    // Matches: under 600 calories, less than 500 kcal, below 450 cals
    Regex::new(r"(?i)\b(?:under|less than|below)\s+(\d+)\s*(?:calories|cals?|kcal)\b").ok()
});

const LOCATION_PHRASES: &[&str] = &["near me", "close by", "nearby", "around here", "in my area"];

/// Meal of the day the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Brunch,
    Snack,
    Dessert,
}

impl MealType {
    const ALL: [MealType; 6] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Brunch,
        MealType::Snack,
        MealType::Dessert,
    ];

    fn keyword(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Brunch => "brunch",
            MealType::Snack => "snack",
            MealType::Dessert => "dessert",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Dietary preference detected in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryPreference {
    LowCarb,
    HighProtein,
    Vegan,
    Vegetarian,
    GlutenFree,
    Paleo,
    WeightLoss,
    Balanced,
}

impl DietaryPreference {
    // Checked in order; first hit wins.
    const ALL: [DietaryPreference; 8] = [
        DietaryPreference::LowCarb,
        DietaryPreference::HighProtein,
        DietaryPreference::Vegan,
        DietaryPreference::Vegetarian,
        DietaryPreference::GlutenFree,
        DietaryPreference::Paleo,
        DietaryPreference::WeightLoss,
        DietaryPreference::Balanced,
    ];

    fn phrases(self) -> &'static [&'static str] {
        match self {
            DietaryPreference::LowCarb => &["low carb", "keto", "ketogenic"],
            DietaryPreference::HighProtein => &["high protein", "protein rich", "muscle gain", "bulking"],
            DietaryPreference::Vegan => &["vegan", "plant based", "no animal products"],
            DietaryPreference::Vegetarian => &["vegetarian", "no meat", "meatless"],
            DietaryPreference::GlutenFree => &["gluten free"],
            DietaryPreference::Paleo => &["paleo"],
            DietaryPreference::WeightLoss => &["weight loss", "lose weight", "fat loss", "cutting"],
            DietaryPreference::Balanced => &["balanced", "healthy", "wellness", "maintenance"],
        }
    }

    /// Fitness goal this preference implies, if any.
    pub fn goal_hint(self) -> Option<FitnessGoal> {
        match self {
            DietaryPreference::LowCarb => Some(FitnessGoal::Keto),
            DietaryPreference::HighProtein => Some(FitnessGoal::MuscleGain),
            DietaryPreference::WeightLoss => Some(FitnessGoal::WeightLoss),
            DietaryPreference::Balanced => Some(FitnessGoal::Balanced),
            DietaryPreference::Vegan
            | DietaryPreference::Vegetarian
            | DietaryPreference::GlutenFree
            | DietaryPreference::Paleo => None,
        }
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrases()[0])
    }
}

/// Structured filters extracted from a free-form query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilters {
    pub meal_type: Option<MealType>,
    pub dietary_preference: Option<DietaryPreference>,
    /// The user asked for places near them
    pub near_me: bool,
    pub calorie_limit: Option<u32>,
    pub raw_query: String,
}

impl QueryFilters {
    /// Goal to rank for; balanced when the query implies none.
    pub fn goal(&self) -> FitnessGoal {
        self.dietary_preference
            .and_then(DietaryPreference::goal_hint)
            .unwrap_or(FitnessGoal::Balanced)
    }

    /// Whether a meal passes the calorie limit. Meals without nutrition pass.
    pub fn admits(&self, meal: &MealCandidate) -> bool {
        match (self.calorie_limit, meal.usable_nutrition()) {
            (Some(limit), Some(n)) => n.calories <= f64::from(limit),
            _ => true,
        }
    }
}

/// Parse a free-form query.
///
/// # Example
/// ```
/// use mealfinder_meals::{parse_query, FitnessGoal};
///
/// let filters = parse_query("High-protein lunch near me under 600 calories");
/// assert_eq!(filters.calorie_limit, Some(600));
/// assert!(filters.near_me);
/// assert_eq!(filters.goal(), FitnessGoal::MuscleGain);
/// ```
pub fn parse_query(query: &str) -> QueryFilters {
    // Padding lets phrase lookups respect word boundaries.
    let padded = format!(" {} ", normalize(query));
    let has_phrase = |phrase: &str| padded.contains(&format!(" {phrase} "));

    let meal_type = MealType::ALL.into_iter().find(|t| has_phrase(t.keyword()));
    let dietary_preference = DietaryPreference::ALL
        .into_iter()
        .find(|p| p.phrases().iter().any(|phrase| has_phrase(phrase)));
    let near_me = LOCATION_PHRASES.iter().any(|phrase| has_phrase(phrase));
    let calorie_limit = CALORIE_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(query))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    QueryFilters {
        meal_type,
        dietary_preference,
        near_me,
        calorie_limit,
        raw_query: query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NutritionEstimate;

    #[test]
    fn test_full_query() {
        let f = parse_query("Keto dinner nearby, less than 500 calories please");
        assert_eq!(f.meal_type, Some(MealType::Dinner));
        assert_eq!(f.dietary_preference, Some(DietaryPreference::LowCarb));
        assert!(f.near_me);
        assert_eq!(f.calorie_limit, Some(500));
        assert_eq!(f.goal(), FitnessGoal::Keto);
    }

    #[test]
    fn test_brunch_is_not_lunch() {
        assert_eq!(parse_query("sunday brunch").meal_type, Some(MealType::Brunch));
    }

    #[test]
    fn test_empty_query() {
        let f = parse_query("");
        assert_eq!(f.meal_type, None);
        assert_eq!(f.dietary_preference, None);
        assert!(!f.near_me);
        assert_eq!(f.calorie_limit, None);
        assert_eq!(f.goal(), FitnessGoal::Balanced);
    }

    #[test]
    fn test_preference_without_goal_defaults_to_balanced() {
        let f = parse_query("vegan snack");
        assert_eq!(f.dietary_preference, Some(DietaryPreference::Vegan));
        assert_eq!(f.goal(), FitnessGoal::Balanced);
    }

    #[test]
    fn test_calorie_variants() {
        assert_eq!(parse_query("below 450 kcal").calorie_limit, Some(450));
        assert_eq!(parse_query("UNDER 700 Calories").calorie_limit, Some(700));
        assert_eq!(parse_query("under 700 dollars").calorie_limit, None);
    }

    #[test]
    fn test_admits() {
        let f = parse_query("under 500 calories");
        let light = MealCandidate::new("a", "b")
            .with_nutrition(NutritionEstimate::new(400.0, 30.0, 12.0, 28.0));
        let heavy = MealCandidate::new("a", "c")
            .with_nutrition(NutritionEstimate::new(780.0, 64.0, 8.0, 31.0));
        assert!(f.admits(&light));
        assert!(!f.admits(&heavy));
        assert!(f.admits(&MealCandidate::new("a", "d")));
    }

    #[test]
    fn test_serializes_kebab_case_preference() {
        let f = parse_query("gluten-free lunch");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["dietary_preference"], "gluten-free");
        assert_eq!(json["meal_type"], "lunch");
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(MealType::Brunch.to_string(), "brunch");
        assert_eq!(DietaryPreference::HighProtein.to_string(), "high protein");
    }
}
