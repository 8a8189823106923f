//! Built-in sample candidates, used when no candidate file is supplied.

use crate::menu::slug;
use crate::model::{MealCandidate, NutritionEstimate};

/// (restaurant, dish, cuisine, kcal, protein, carbs, fat, miles)
const SAMPLES: &[(&str, &str, &str, f64, f64, f64, f64, f64)] = &[
    ("Sweetgreen - SoHo", "Chicken + Brussels Bowl", "American", 485.0, 34.0, 29.0, 21.0, 1.2),
    ("Chipotle - Broadway", "Barbacoa Bowl", "Mexican", 735.0, 42.0, 60.0, 30.0, 2.5),
    ("Dig - Park Ave", "Herb Chicken + Roasted Veggies", "American", 550.0, 38.0, 45.0, 18.0, 3.1),
    ("Just Salad - Union Square", "Keto Chicken Caesar", "American", 400.0, 30.0, 12.0, 28.0, 0.9),
    ("Panera Bread", "Mediterranean Veggie Sandwich", "Mediterranean", 550.0, 19.0, 66.0, 18.0, 5.2),
    ("Choongman Chicken", "Whole Chicken (Garlic Soy)", "Korean", 1980.0, 109.0, 66.0, 54.0, 4.7),
    ("Steakhouse 51", "Steak", "Steakhouse", 780.0, 64.0, 8.0, 31.0, 2.3),
];

/// Sample meals around lower Manhattan with known nutrition and distance.
pub fn sample_meals() -> Vec<MealCandidate> {
    SAMPLES
        .iter()
        .map(|&(restaurant, dish, cuisine, kcal, protein, carbs, fat, miles)| {
            MealCandidate::new(restaurant, dish)
                .with_description(format!("{dish} from {restaurant}"))
                .with_cuisine(cuisine)
                .with_nutrition(NutritionEstimate::new(kcal, protein, carbs, fat))
                .with_distance(miles)
                .with_source_id(slug(restaurant))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_well_formed() {
        let meals = sample_meals();
        assert_eq!(meals.len(), 7);
        assert!(meals.iter().all(|m| m.usable_nutrition().is_some()));
        assert!(meals.iter().all(|m| m.distance_miles.is_some()));
        assert_eq!(meals[6].source_restaurant_id, "steakhouse-51");
    }
}
