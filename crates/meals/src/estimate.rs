//! Keyword-based nutrition estimation and estimate sanity checks.
//!
//! Used when a candidate arrives without nutrition data. The estimate
//! starts from a typical restaurant entree and is nudged by ingredient and
//! cooking-method keywords.

use crate::error::{MealError, Result};
use crate::model::NutritionEstimate;

const BASE: NutritionEstimate = NutritionEstimate::new(400.0, 20.0, 40.0, 15.0);
const FLOOR: NutritionEstimate = NutritionEstimate::new(200.0, 5.0, 10.0, 5.0);

/// Keyword group and the (calories, protein, carbs, fat) delta it applies.
const ADJUSTMENTS: &[(&[&str], [f64; 4])] = &[
    (
        &["chicken", "turkey", "fish", "salmon", "tuna", "beef", "steak", "pork"],
        [100.0, 15.0, 0.0, 0.0],
    ),
    (
        &["rice", "pasta", "bread", "potato", "quinoa", "oatmeal"],
        [120.0, 0.0, 30.0, 0.0],
    ),
    (
        &["avocado", "nuts", "olive oil", "butter", "cheese"],
        [90.0, 0.0, 0.0, 10.0],
    ),
    (
        &["salad", "vegetables", "greens", "broccoli", "spinach"],
        [-50.0, 0.0, -10.0, 0.0],
    ),
    (&["fried", "crispy"], [150.0, 0.0, 0.0, 15.0]),
    (&["grilled", "baked", "roasted"], [-50.0, 0.0, 0.0, -5.0]),
];

/// Estimate nutrition from a dish description.
///
/// # Example
/// ```
/// use mealfinder_meals::estimate_nutrition;
///
/// let n = estimate_nutrition("Grilled chicken with rice");
/// assert_eq!(n.calories, 570.0);
/// assert_eq!(n.protein_g, 35.0);
/// ```
pub fn estimate_nutrition(description: &str) -> NutritionEstimate {
    let text = description.to_lowercase();

    let mut values = [BASE.calories, BASE.protein_g, BASE.carbs_g, BASE.fat_g];
    for (keywords, delta) in ADJUSTMENTS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            for (value, d) in values.iter_mut().zip(delta) {
                *value += d;
            }
        }
    }

    let [calories, protein, carbs, fat] = values;
    NutritionEstimate::new(
        calories.max(FLOOR.calories),
        protein.max(FLOOR.protein_g),
        carbs.max(FLOOR.carbs_g),
        fat.max(FLOOR.fat_g),
    )
}

/// Reject estimates outside plausible single-meal ranges or whose calories
/// disagree with their macros by more than 200 kcal.
pub fn validate_estimate(n: &NutritionEstimate) -> Result<()> {
    let checks = [
        ("Calories", n.calories, 50.0, 2000.0, ""),
        ("Protein", n.protein_g, 0.0, 100.0, "g"),
        ("Carbs", n.carbs_g, 0.0, 200.0, "g"),
        ("Fat", n.fat_g, 0.0, 100.0, "g"),
    ];
    for (name, value, min, max, unit) in checks {
        if !(min..=max).contains(&value) {
            return Err(MealError::InvalidEstimate(format!(
                "{name} ({value}{unit}) outside reasonable range ({min}-{max}{unit})"
            )));
        }
    }

    let implied = n.macro_calories();
    if (n.calories - implied).abs() > 200.0 {
        return Err(MealError::InvalidEstimate(format!(
            "Calorie mismatch: {} vs calculated {implied}",
            n.calories
        )));
    }
    Ok(())
}
