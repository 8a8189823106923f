//! CLI command implementations

pub mod goals;
pub mod matching;
pub mod menu;
pub mod query;
pub mod rank;

use anyhow::Result;
use mealfinder_core::config::Config;
use mealfinder_meals::{GoalMatcher, MatcherSettings};
use serde::Serialize;

/// Settings shared by every command
pub struct Context {
    pub config: Config,
    pub json: bool,
}

impl Context {
    /// Goal matcher using the configured thresholds
    pub fn matcher(&self) -> GoalMatcher {
        GoalMatcher::with_settings(MatcherSettings::from(&self.config.schema.matcher))
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
