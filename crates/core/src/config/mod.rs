//! Configuration loading and schema definitions
//!
//! Settings for goal matching, scoring, ranking and logging, read from TOML.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
