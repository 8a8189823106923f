//! Core utilities for mealfinder
//!
//! This crate provides shared functionality used by the recommendation
//! crates and the command-line front end:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Validation**: fluent checks for configuration values and input
//!
//! # Example
//!
//! ```rust
//! use mealfinder_core::config::Config;
//!
//! let config = Config::from_toml_str("[ranking]\ndefault_limit = 5\n").unwrap();
//! assert_eq!(config.schema.ranking.default_limit, 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
