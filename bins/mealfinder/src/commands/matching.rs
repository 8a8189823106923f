//! Match command - resolve free text to a fitness goal

use super::{print_json, Context};
use anyhow::Result;
use mealfinder_cli::output::{confidence_badge, Status};
use mealfinder_core::Error as CoreError;
use mealfinder_telemetry::metrics;
use owo_colors::OwoColorize;

/// Run match command
pub fn run(ctx: &Context, text: &str) -> Result<()> {
    let result = ctx.matcher().match_goal(text).map_err(CoreError::from)?;

    metrics().increment("goals.matched");
    if !result.is_confident() {
        metrics().increment("goals.low_confidence");
    }

    if ctx.json {
        return print_json(&result);
    }

    println!(
        "{} {} {}",
        result.matched_goal.display_name().bold(),
        format!("({})", result.matched_goal.id()).dimmed(),
        confidence_badge(result.level, result.confidence)
    );
    if !result.matched_phrase.is_empty() {
        println!("  {} \"{}\"", "matched:".dimmed(), result.matched_phrase);
    }

    if !result.is_confident() {
        Status::warning(&format!(
            "Low confidence for \"{}\"; run `mealfinder goals` to see what is supported",
            text.trim()
        ));
    }

    println!("  {}", "other goals:".dimmed());
    for suggestion in &result.suggestions {
        println!(
            "    {:<14} {}%",
            suggestion.goal.display_name(),
            suggestion.score
        );
    }

    Ok(())
}
