//! Fuzzy resolution of free-text goal input.
//!
//! Every goal owns a list of phrases: its synonyms (misspellings included),
//! its id and its display name, all normalized once at construction. The
//! input is normalized the same way and compared against each phrase with
//! three edit-distance metrics; the best phrase score is the goal's score.
//!
//! | metric | catches |
//! |---|---|
//! | `ratio` | typos (`"ketoo"`, `"balansed"`) |
//! | `token_sort_ratio` | reordered words (`"gain muscle"`) |
//! | `token_set_ratio` x discount | phrases inside sentences (`"i want to lose weight"`) |
//!
//! The token-set metric is discounted so an embedded phrase never outscores
//! an exact one. It only applies to phrases of two or more words that fit
//! inside the input: a lone shared word like `"diet"` in `"kto diet"` must
//! not outrank the one-typo match `"keto diet"`.

use crate::error::{MealError, Result};
use crate::goal::FitnessGoal;
use mealfinder_core::config::MatcherConfig;
use mealfinder_search::{best_match, normalize, ratio, token_set_ratio, token_sort_ratio};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Thresholds controlling how match confidence is reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherSettings {
    /// Below this a match is flagged as low confidence
    pub acceptance_threshold: u8,
    /// At or above this a match is high confidence
    pub high_confidence_threshold: u8,
    /// Multiplier for token-set similarity
    pub token_set_discount: f64,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self::from(&MatcherConfig::default())
    }
}

impl From<&MatcherConfig> for MatcherSettings {
    fn from(config: &MatcherConfig) -> Self {
        Self {
            acceptance_threshold: config.acceptance_threshold,
            high_confidence_threshold: config.high_confidence_threshold,
            token_set_discount: config.token_set_discount.clamp(0.0, 1.0),
        }
    }
}

/// How much to trust a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// At or above the high-confidence threshold
    High,
    /// Accepted, but below the high-confidence threshold
    Medium,
    /// Below the acceptance threshold
    Low,
}

/// Score of a goal that was not selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSuggestion {
    pub goal: FitnessGoal,
    pub score: u8,
}

/// Outcome of resolving free text to a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalMatchResult {
    /// Best goal, returned even when confidence is low
    pub matched_goal: FitnessGoal,
    /// Similarity of the best phrase, 0-100
    pub confidence: u8,
    /// Normalized phrase that produced the confidence
    pub matched_phrase: String,
    /// Remaining goals, best first
    pub suggestions: Vec<GoalSuggestion>,
    /// Confidence band
    pub level: ConfidenceLevel,
}

impl GoalMatchResult {
    /// True unless the confidence fell below the acceptance threshold.
    pub fn is_confident(&self) -> bool {
        self.level != ConfidenceLevel::Low
    }
}

#[derive(Debug, Clone)]
struct GoalPhrases {
    goal: FitnessGoal,
    phrases: Vec<String>,
}

impl GoalPhrases {
    fn build(goal: FitnessGoal) -> Self {
        let mut phrases: Vec<String> = Vec::with_capacity(goal.synonyms().len() + 2);
        let sources = goal
            .synonyms()
            .iter()
            .copied()
            .chain([goal.id(), goal.display_name()]);

        for source in sources {
            let phrase = normalize(source);
            if !phrase.is_empty() && !phrases.contains(&phrase) {
                phrases.push(phrase);
            }
        }

        Self { goal, phrases }
    }
}

/// Resolves free-text goal input to a [`FitnessGoal`].
///
/// The phrase table is built once and never mutated, so a matcher can be
/// shared across threads by reference.
#[derive(Debug, Clone)]
pub struct GoalMatcher {
    catalog: Vec<GoalPhrases>,
    settings: MatcherSettings,
}

impl Default for GoalMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalMatcher {
    /// Matcher with default thresholds.
    pub fn new() -> Self {
        Self::with_settings(MatcherSettings::default())
    }

    /// Matcher with explicit thresholds.
    pub fn with_settings(settings: MatcherSettings) -> Self {
        let catalog = FitnessGoal::ALL.into_iter().map(GoalPhrases::build).collect();
        Self { catalog, settings }
    }

    /// Active thresholds.
    pub fn settings(&self) -> &MatcherSettings {
        &self.settings
    }

    /// Resolve `input` to the closest goal.
    ///
    /// Fails only on empty or whitespace-only input. Input that normalizes
    /// to nothing (pure punctuation) scores zero against every goal and
    /// resolves to the first goal with confidence 0.
    ///
    /// # Example
    /// ```
    /// use mealfinder_meals::{FitnessGoal, GoalMatcher};
    ///
    /// let result = GoalMatcher::new().match_goal("musle gain").unwrap();
    /// assert_eq!(result.matched_goal, FitnessGoal::MuscleGain);
    /// assert_eq!(result.confidence, 100);
    /// ```
    pub fn match_goal(&self, input: &str) -> Result<GoalMatchResult> {
        if input.trim().is_empty() {
            return Err(MealError::InvalidInput(
                "goal text must not be empty".to_string(),
            ));
        }

        let query = normalize(input);
        let discount = self.settings.token_set_discount;
        let similarity = |q: &str, phrase: &str| -> u8 {
            ratio(q, phrase)
                .max(token_sort_ratio(q, phrase))
                .max(embedded_score(q, phrase, discount))
        };

        // (goal, score, phrase index), in declaration order
        let mut scored: Vec<(FitnessGoal, u8, Option<usize>)> = self
            .catalog
            .iter()
            .map(|entry| {
                let found = best_match(&query, entry.phrases.iter().map(String::as_str), similarity);
                (
                    entry.goal,
                    found.map_or(0, |m| m.score),
                    found.map(|m| m.index),
                )
            })
            .collect();

        debug!(
            input = %input,
            normalized = %query,
            scores = ?scored.iter().map(|(g, s, _)| (g.id(), *s)).collect::<Vec<_>>(),
            "Scored goal phrases"
        );

        // Stable sort keeps declaration order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let (matched_goal, confidence, phrase_index) = scored[0];
        let matched_phrase = phrase_index
            .and_then(|i| self.phrases_for(matched_goal).get(i))
            .cloned()
            .unwrap_or_default();

        let suggestions = scored[1..]
            .iter()
            .map(|&(goal, score, _)| GoalSuggestion { goal, score })
            .collect();

        let level = self.level_for(confidence);
        match level {
            ConfidenceLevel::Low => warn!(
                input = %input,
                goal = %matched_goal,
                confidence,
                threshold = self.settings.acceptance_threshold,
                "Low-confidence goal match"
            ),
            _ => info!(
                input = %input,
                goal = %matched_goal,
                confidence,
                phrase = %matched_phrase,
                "Matched goal"
            ),
        }

        Ok(GoalMatchResult {
            matched_goal,
            confidence,
            matched_phrase,
            suggestions,
            level,
        })
    }

    fn phrases_for(&self, goal: FitnessGoal) -> &[String] {
        self.catalog
            .iter()
            .find(|entry| entry.goal == goal)
            .map_or(&[], |entry| entry.phrases.as_slice())
    }

    fn level_for(&self, confidence: u8) -> ConfidenceLevel {
        if confidence >= self.settings.high_confidence_threshold {
            ConfidenceLevel::High
        } else if confidence >= self.settings.acceptance_threshold {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Discounted token-set similarity of a multi-word `phrase` found in `query`.
///
/// Zero for single-word phrases and for phrases with more words than the
/// query.
fn embedded_score(query: &str, phrase: &str, discount: f64) -> u8 {
    let phrase_words = phrase.split_whitespace().count();
    if phrase_words < 2 || query.split_whitespace().count() < phrase_words {
        return 0;
    }
    (f64::from(token_set_ratio(query, phrase)) * discount).round() as u8
}
