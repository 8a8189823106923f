//! Goals command - list fitness goals and their nutrition rules

use super::{print_json, Context};
use anyhow::Result;
use mealfinder_cli::output::Status;
use mealfinder_core::Error as CoreError;
use mealfinder_meals::{FitnessGoal, NutritionRule, NutritionRuleSet};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct GoalEntry {
    id: &'static str,
    display_name: &'static str,
    description: &'static str,
    synonyms: &'static [&'static str],
    rules: NutritionRule,
}

/// Run goals command
pub fn run(ctx: &Context) -> Result<()> {
    let rules = NutritionRuleSet::from_overrides(&ctx.config.schema.rules).map_err(CoreError::from)?;

    let entries: Vec<GoalEntry> = FitnessGoal::ALL
        .iter()
        .map(|&goal| GoalEntry {
            id: goal.id(),
            display_name: goal.display_name(),
            description: goal.description(),
            synonyms: goal.synonyms(),
            rules: *rules.rules_for(goal),
        })
        .collect();

    if ctx.json {
        return print_json(&entries);
    }

    Status::header("Fitness goals");
    for entry in &entries {
        println!();
        println!("  {} {}", entry.display_name.bold(), format!("({})", entry.id).dimmed());
        println!("    {}", entry.description);

        let bounds: Vec<String> = entry.rules.bounds().map(|b| b.to_string()).collect();
        if bounds.is_empty() {
            println!("    {}", "no nutrition bounds".dimmed());
        } else {
            println!("    {} {}", "rules:".dimmed(), bounds.join(", "));
        }
    }
    println!();

    Ok(())
}
