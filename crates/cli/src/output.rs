//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use mealfinder_meals::{ConfidenceLevel, NutritionEstimate};
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Format a relevance score in `[0, 1]` as a whole percentage
pub fn format_score(score: f64) -> String {
    format!("{:.0}%", (score.clamp(0.0, 1.0) * 100.0))
}

/// Format a distance in miles
pub fn format_miles(miles: f64) -> String {
    format!("{:.1} mi", miles)
}

/// Format a calorie count
pub fn format_calories(calories: f64) -> String {
    format!("{:.0} kcal", calories)
}

/// Format calories and macros on one line, e.g. `485 kcal · P 34g · C 29g · F 21g`
pub fn format_macros(nutrition: &NutritionEstimate) -> String {
    format!(
        "{} · P {:.0}g · C {:.0}g · F {:.0}g",
        format_calories(nutrition.calories),
        nutrition.protein_g,
        nutrition.carbs_g,
        nutrition.fat_g
    )
}

/// Colored confidence label for a goal match
pub fn confidence_badge(level: ConfidenceLevel, confidence: u8) -> String {
    let text = format!("{}%", confidence);
    match level {
        ConfidenceLevel::High => text.green().to_string(),
        ConfidenceLevel::Medium => text.yellow().to_string(),
        ConfidenceLevel::Low => text.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration(Duration::from_secs_f32(5.5)), "5.5s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "meal", "meals"), "1 meal");
        assert_eq!(format_count(5, "meal", "meals"), "5 meals");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.8734), "87%");
        assert_eq!(format_score(1.0), "100%");
        assert_eq!(format_score(-0.2), "0%");
    }

    #[test]
    fn test_format_miles_and_calories() {
        assert_eq!(format_miles(1.26), "1.3 mi");
        assert_eq!(format_miles(0.0), "0.0 mi");
        assert_eq!(format_calories(484.6), "485 kcal");
    }

    #[test]
    fn test_format_macros() {
        let n = NutritionEstimate::new(485.0, 34.0, 29.0, 21.0);
        assert_eq!(format_macros(&n), "485 kcal · P 34g · C 29g · F 21g");
    }

    #[test]
    fn test_confidence_badge_contains_value() {
        assert!(confidence_badge(ConfidenceLevel::High, 92).contains("92%"));
        assert!(confidence_badge(ConfidenceLevel::Low, 12).contains("12%"));
    }
}
