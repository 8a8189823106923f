//! Derive candidate distances from a user origin.

use crate::model::MealCandidate;
use mealfinder_geo::{haversine_distance_miles, Coordinate};
use tracing::debug;

/// Fill `distance_miles` from each candidate's location.
///
/// Candidates without a valid location keep whatever distance they already
/// carry. Distances are rounded to a tenth of a mile. Returns how many
/// candidates were updated.
pub fn annotate_distances(candidates: &mut [MealCandidate], origin: &Coordinate) -> usize {
    let mut updated = 0;
    for meal in candidates.iter_mut() {
        let Some(location) = meal.location.filter(Coordinate::is_valid) else {
            continue;
        };
        let miles = haversine_distance_miles(origin, &location);
        meal.distance_miles = Some((miles * 10.0).round() / 10.0);
        updated += 1;
    }

    debug!(
        total = candidates.len(),
        updated,
        "Annotated candidate distances"
    );
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_distances() {
        let soho = Coordinate::new(40.7233, -74.0030);
        let mut meals = vec![
            MealCandidate::new("Just Salad", "Caesar").with_location(Coordinate::new(40.7359, -73.9911)),
            MealCandidate::new("Unknown", "Bowl").with_distance(4.0),
            MealCandidate::new("Broken", "Wrap").with_location(Coordinate::new(123.0, 0.0)),
        ];

        assert_eq!(annotate_distances(&mut meals, &soho), 1);

        let near = meals[0].distance_miles.unwrap();
        assert!(near > 0.9 && near < 1.3, "{near}");
        assert_eq!(meals[1].distance_miles, Some(4.0));
        assert_eq!(meals[2].distance_miles, None);
    }
}
