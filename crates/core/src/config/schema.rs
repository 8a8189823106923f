//! Configuration schema definitions
//!
//! Every section and field has a default, so an empty file is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Goal matching thresholds
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Scoring weights and decay parameters
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Ranking defaults
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Per-goal nutrition rule overrides, keyed by goal id
    #[serde(default)]
    pub rules: BTreeMap<String, RuleOverride>,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fuzzy goal matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Confidence below which a match is reported as uncertain
    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: u8,

    /// Confidence at or above which a match is considered strong
    #[serde(default = "default_high_confidence_threshold")]
    pub high_confidence_threshold: u8,

    /// Multiplier applied to token-set similarity
    #[serde(default = "default_token_set_discount")]
    pub token_set_discount: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: default_acceptance_threshold(),
            high_confidence_threshold: default_high_confidence_threshold(),
            token_set_discount: default_token_set_discount(),
        }
    }
}

fn default_acceptance_threshold() -> u8 {
    60
}

fn default_high_confidence_threshold() -> u8 {
    80
}

fn default_token_set_discount() -> f64 {
    0.9
}

/// Meal scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the nutrition-fit sub-score
    #[serde(default = "default_nutrition_weight")]
    pub nutrition_weight: f64,

    /// Weight of the cuisine-match bonus
    #[serde(default = "default_cuisine_weight")]
    pub cuisine_weight: f64,

    /// Weight of the flavor-match bonus
    #[serde(default = "default_flavor_weight")]
    pub flavor_weight: f64,

    /// Relative distance outside a bound at which credit reaches zero
    #[serde(default = "default_overage_tolerance")]
    pub overage_tolerance: f64,

    /// Nutrition credit for meals without nutrition data
    #[serde(default = "default_missing_nutrition_credit")]
    pub missing_nutrition_credit: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            nutrition_weight: default_nutrition_weight(),
            cuisine_weight: default_cuisine_weight(),
            flavor_weight: default_flavor_weight(),
            overage_tolerance: default_overage_tolerance(),
            missing_nutrition_credit: default_missing_nutrition_credit(),
        }
    }
}

fn default_nutrition_weight() -> f64 {
    0.7
}

fn default_cuisine_weight() -> f64 {
    0.2
}

fn default_flavor_weight() -> f64 {
    0.1
}

fn default_overage_tolerance() -> f64 {
    0.5
}

fn default_missing_nutrition_credit() -> f64 {
    0.5
}

/// Ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Number of meals returned when the caller gives no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Fail instead of returning an empty list when nothing survives filtering
    #[serde(default)]
    pub require_results: bool,

    /// Drop meals farther than this many miles (unknown distances are kept)
    #[serde(default)]
    pub max_distance_miles: Option<f64>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            require_results: false,
            max_distance_miles: None,
        }
    }
}

fn default_limit() -> usize {
    10
}

/// Partial override of one goal's nutrition bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverride {
    /// Minimum protein in grams
    pub min_protein: Option<f64>,
    /// Maximum calories
    pub max_calories: Option<f64>,
    /// Maximum carbohydrates in grams
    pub max_carbs: Option<f64>,
    /// Minimum fat in grams
    pub min_fat: Option<f64>,
    /// Maximum fat in grams
    pub max_fat: Option<f64>,
}

impl RuleOverride {
    /// Present bounds as `(name, value)` pairs
    pub fn bounds(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        [
            ("min_protein", self.min_protein),
            ("max_calories", self.max_calories),
            ("max_carbs", self.max_carbs),
            ("min_fat", self.min_fat),
            ("max_fat", self.max_fat),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Include the event target in log lines
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            show_target: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
