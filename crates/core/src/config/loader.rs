//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use crate::validation::{ValidationResult, Validator};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed and validated settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations.
    ///
    /// An explicit `path` must exist. Without one, the first file found in
    /// the standard locations is used, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate().to_result().map_err(|e| {
            Error::new(ErrorCode::ConfigValidationError, e.message)
                .with_context(config.describe_source())
        })?;

        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        let config = Self { schema, path: None };
        config
            .validate()
            .to_result()
            .map_err(|e| Error::new(ErrorCode::ConfigValidationError, e.message))?;
        Ok(config)
    }

    /// Check value ranges and cross-field constraints.
    pub fn validate(&self) -> ValidationResult {
        let matcher = &self.schema.matcher;
        let scoring = &self.schema.scoring;
        let ranking = &self.schema.ranking;

        let weight_sum = scoring.nutrition_weight + scoring.cuisine_weight + scoring.flavor_weight;

        let mut validator = Validator::new()
            .range("matcher.acceptance_threshold", matcher.acceptance_threshold, 0, 100)
            .range(
                "matcher.high_confidence_threshold",
                matcher.high_confidence_threshold,
                matcher.acceptance_threshold,
                100,
            )
            .range("matcher.token_set_discount", matcher.token_set_discount, 0.0, 1.0)
            .range("scoring.nutrition_weight", scoring.nutrition_weight, 0.0, 1.0)
            .range("scoring.cuisine_weight", scoring.cuisine_weight, 0.0, 1.0)
            .range("scoring.flavor_weight", scoring.flavor_weight, 0.0, 1.0)
            .custom("scoring", || {
                (weight_sum > 1.0 + f64::EPSILON)
                    .then(|| format!("Weights sum to {weight_sum:.3}, must not exceed 1.0"))
            })
            .range("scoring.overage_tolerance", scoring.overage_tolerance, 0.01, 10.0)
            .custom("scoring.missing_nutrition_credit", || {
                let credit = scoring.missing_nutrition_credit;
                (!(credit > 0.0 && credit < 1.0))
                    .then(|| format!("Must be strictly between 0 and 1, got {credit}"))
            })
            .range("ranking.default_limit", ranking.default_limit, 1, 1000)
            .required("logging.level", &self.schema.logging.level);

        if let Some(max) = ranking.max_distance_miles {
            validator = validator.non_negative("ranking.max_distance_miles", max);
        }

        for (goal, rule) in &self.schema.rules {
            for (bound, value) in rule.bounds() {
                validator = validator.non_negative(&format!("rules.{goal}.{bound}"), value);
            }
        }

        validator.validate()
    }

    fn describe_source(&self) -> String {
        match &self.path {
            Some(p) => format!("While validating {}", p.display()),
            None => "While validating default configuration".to_string(),
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = [".mealfinder.toml", "mealfinder.toml"]
        .into_iter()
        .map(PathBuf::from);
    let user = dirs::config_dir().map(|dir| dir.join("mealfinder").join("config.toml"));

    local.chain(user).find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}
