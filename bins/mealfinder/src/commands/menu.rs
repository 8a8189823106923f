//! Parse-menu command - extract meal candidates from raw menu text

use super::print_json;
use anyhow::Result;
use mealfinder_cli::output::{format_count, Status};
use mealfinder_core::Error as CoreError;
use mealfinder_meals::{validate_estimate, MealCandidate, MenuParser};
use mealfinder_telemetry::{metrics, timed_span};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Run parse-menu command.
///
/// Always prints JSON so the output can be fed back to `rank --candidates`.
pub fn run(file: &Path, restaurant: &str, cuisine: Option<&str>, max_items: usize) -> Result<()> {
    timed_span!("parse_menu", restaurant = restaurant);

    if restaurant.trim().is_empty() {
        return Err(CoreError::invalid_input("restaurant name must not be empty").into());
    }

    let text = read_menu(file)?;
    let meals = MenuParser::new().with_max_items(max_items).parse(&text, restaurant, cuisine);

    for meal in &meals {
        check_estimate(meal);
    }
    metrics().increment("menus.parsed");
    metrics().increment_by("menus.meals_extracted", meals.len() as u64);

    if meals.is_empty() {
        Status::warning(&format!("No meals found in {}", file.display()));
    } else {
        tracing::info!(found = %format_count(meals.len(), "meal", "meals"), "Parsed menu");
    }

    print_json(&meals)
}

fn read_menu(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map_err(CoreError::from)?;
        return Ok(text);
    }
    if !file.exists() {
        return Err(CoreError::file_not_found(file)
            .with_context("While reading menu text")
            .into());
    }
    Ok(std::fs::read_to_string(file).map_err(CoreError::from)?)
}

fn check_estimate(meal: &MealCandidate) {
    if let Some(nutrition) = &meal.nutrition {
        if let Err(e) = validate_estimate(nutrition) {
            warn!(dish = %meal.dish_name, error = %e, "Estimated nutrition failed sanity check");
        }
    }
}
