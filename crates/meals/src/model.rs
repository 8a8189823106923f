//! Meal candidates, nutrition data and ranking preferences.

use crate::goal::FitnessGoal;
use mealfinder_geo::Coordinate;
use mealfinder_search::contains_ignore_case;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Macronutrient estimate for one dish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    #[serde(alias = "protein")]
    pub protein_g: f64,
    /// Carbohydrates in grams
    #[serde(alias = "carbs")]
    pub carbs_g: f64,
    /// Fat in grams
    #[serde(alias = "fat")]
    pub fat_g: f64,
}

impl NutritionEstimate {
    /// Create an estimate without checks.
    pub const fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    /// True when every value is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein_g, self.carbs_g, self.fat_g]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Energy implied by the macros (4/4/9 kcal per gram).
    pub fn macro_calories(&self) -> f64 {
        self.protein_g * 4.0 + self.carbs_g * 4.0 + self.fat_g * 9.0
    }
}

/// A dish offered by a restaurant, as gathered by a collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealCandidate {
    /// Restaurant display name
    #[serde(alias = "restaurant")]
    pub restaurant_name: String,
    /// Dish name
    #[serde(alias = "dish", alias = "name")]
    pub dish_name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Price in dollars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Dietary and menu tags
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Cuisine label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    /// Flavor label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_profile: Option<String>,
    /// Nutrition data, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionEstimate>,
    /// Distance from the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    /// Identifier of the source restaurant
    #[serde(default)]
    pub source_restaurant_id: String,
    /// Restaurant location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
}

impl MealCandidate {
    /// Create a candidate with only the required names set.
    pub fn new(restaurant_name: impl Into<String>, dish_name: impl Into<String>) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            dish_name: dish_name.into(),
            description: String::new(),
            price: None,
            tags: BTreeSet::new(),
            cuisine: None,
            flavor_profile: None,
            nutrition: None,
            distance_miles: None,
            source_restaurant_id: String::new(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor_profile = Some(flavor.into());
        self
    }

    #[must_use]
    pub fn with_nutrition(mut self, nutrition: NutritionEstimate) -> Self {
        self.nutrition = Some(nutrition);
        self
    }

    #[must_use]
    pub fn with_distance(mut self, miles: f64) -> Self {
        self.distance_miles = Some(miles);
        self
    }

    #[must_use]
    pub fn with_source_id(mut self, id: impl Into<String>) -> Self {
        self.source_restaurant_id = id.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }

    /// Nutrition that is safe to score against; invalid data counts as absent.
    pub fn usable_nutrition(&self) -> Option<&NutritionEstimate> {
        self.nutrition.as_ref().filter(|n| n.is_valid())
    }
}

/// A candidate with its relevance for one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMeal {
    /// The ranked candidate
    #[serde(flatten)]
    pub candidate: MealCandidate,
    /// Relevance in `[0, 1]`
    pub relevance_score: f64,
    /// Goal the score was computed for
    pub matched_goal: FitnessGoal,
}

/// Optional user preferences applied during ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Preferred cuisine
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Preferred flavor profile
    #[serde(default)]
    pub flavor_profile: Option<String>,
    /// Ingredients that disqualify a meal
    #[serde(default)]
    pub exclude_ingredients: BTreeSet<String>,
    /// Drop meals farther than this
    #[serde(default)]
    pub max_distance_miles: Option<f64>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor_profile = Some(flavor.into());
        self
    }

    #[must_use]
    pub fn exclude(mut self, ingredient: impl Into<String>) -> Self {
        self.exclude_ingredients.insert(ingredient.into());
        self
    }

    #[must_use]
    pub fn with_max_distance(mut self, miles: f64) -> Self {
        self.max_distance_miles = Some(miles);
        self
    }

    /// Whether any exclusion term appears in the meal's description, dish
    /// name or tags. Blank terms never match.
    pub fn excludes(&self, meal: &MealCandidate) -> bool {
        self.exclude_ingredients
            .iter()
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
            .any(|term| {
                contains_ignore_case(&meal.description, term)
                    || contains_ignore_case(&meal.dish_name, term)
                    || meal.tags.iter().any(|tag| contains_ignore_case(tag, term))
            })
    }

    /// Whether the meal is within `limit` miles. Unknown distances pass.
    pub fn within_distance(meal: &MealCandidate, limit: Option<f64>) -> bool {
        match (limit, meal.distance_miles) {
            (Some(max), Some(distance)) => distance <= max,
            _ => true,
        }
    }
}
