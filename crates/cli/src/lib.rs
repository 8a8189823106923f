//! CLI utilities for mealfinder
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Formatting of scores, distances, calories and macros
//! - Confidence badges for goal matches

#![warn(missing_docs)]

pub mod output;
