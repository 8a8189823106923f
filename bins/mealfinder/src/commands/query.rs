//! Query command - parse a free-form search into filters

use super::{print_json, Context};
use anyhow::Result;
use mealfinder_cli::output::{format_calories, Status};
use mealfinder_core::Error as CoreError;
use mealfinder_meals::{parse_query, FitnessGoal, QueryFilters};
use mealfinder_telemetry::metrics;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct QueryOutput {
    #[serde(flatten)]
    filters: QueryFilters,
    goal: FitnessGoal,
}

/// Run query command
pub fn run(ctx: &Context, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(CoreError::invalid_input("query text must not be empty").into());
    }

    let filters = parse_query(text);
    metrics().increment("queries.parsed");

    let goal = filters.goal();
    if ctx.json {
        return print_json(&QueryOutput { filters, goal });
    }

    Status::header("Search filters");
    let any = || "any".dimmed().to_string();
    println!(
        "  {:<14} {}",
        "Meal type:",
        filters.meal_type.map_or_else(any, |t| t.to_string())
    );
    println!(
        "  {:<14} {}",
        "Diet:",
        filters.dietary_preference.map_or_else(any, |p| p.to_string())
    );
    println!(
        "  {:<14} {}",
        "Near me:",
        if filters.near_me { "yes" } else { "no" }
    );
    println!(
        "  {:<14} {}",
        "Calorie limit:",
        filters
            .calorie_limit
            .map_or_else(|| "none".dimmed().to_string(), |c| format_calories(f64::from(c)))
    );
    println!("  {:<14} {}", "Goal:", goal.display_name().bold());

    Ok(())
}
