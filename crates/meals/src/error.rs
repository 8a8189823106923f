//! Error types for the meals crate.

use mealfinder_core::error::{Error as CoreError, ErrorCode};
use thiserror::Error;

/// Result type alias for meal operations.
pub type Result<T> = std::result::Result<T, MealError>;

/// Errors that can occur while matching goals or ranking meals.
#[derive(Debug, Error)]
pub enum MealError {
    /// Caller input rejected before any work was done
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing survived filtering while results were required
    #[error("No meals left after filtering {total} candidates")]
    EmptyCandidateSet {
        /// Number of candidates before filtering
        total: usize,
    },

    /// Goal id not present in the catalog
    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    /// Rule override rejected
    #[error("Invalid rule for {goal}: {message}")]
    InvalidRule {
        /// Goal the override targets
        goal: String,
        /// What was wrong with it
        message: String,
    },

    /// Nutrition estimate failed a sanity check
    #[error("Invalid nutrition estimate: {0}")]
    InvalidEstimate(String),
}

/// Error code for integration with mealfinder-core error handling.
/// Range: 11xxx for meal errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealErrorCode {
    /// Invalid caller input
    InvalidInput = 11001,
    /// Empty candidate set in strict mode
    EmptyCandidateSet = 11002,
    /// Unknown goal id
    UnknownGoal = 11003,
    /// Invalid rule override
    InvalidRule = 11004,
    /// Invalid nutrition estimate
    InvalidEstimate = 11005,
}

impl MealError {
    /// Returns the error code for this error.
    pub fn code(&self) -> MealErrorCode {
        match self {
            MealError::InvalidInput(_) => MealErrorCode::InvalidInput,
            MealError::EmptyCandidateSet { .. } => MealErrorCode::EmptyCandidateSet,
            MealError::UnknownGoal(_) => MealErrorCode::UnknownGoal,
            MealError::InvalidRule { .. } => MealErrorCode::InvalidRule,
            MealError::InvalidEstimate(_) => MealErrorCode::InvalidEstimate,
        }
    }
}

impl From<MealError> for CoreError {
    fn from(err: MealError) -> Self {
        let message = err.to_string();
        match err {
            MealError::InvalidInput(_) => CoreError::invalid_input(message),
            MealError::EmptyCandidateSet { .. } => CoreError::empty_candidate_set(message),
            MealError::UnknownGoal(_) => CoreError::new(ErrorCode::UnknownGoal, message)
                .with_suggestion("Run `mealfinder goals` to list the supported goals"),
            MealError::InvalidRule { .. } => {
                CoreError::new(ErrorCode::InvalidConfigValue, message)
            }
            MealError::InvalidEstimate(_) => CoreError::new(ErrorCode::ConstraintViolation, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_in_meal_range() {
        let errors = [
            MealError::InvalidInput("x".into()),
            MealError::EmptyCandidateSet { total: 3 },
            MealError::UnknownGoal("paleo".into()),
            MealError::InvalidRule {
                goal: "keto".into(),
                message: "negative".into(),
            },
            MealError::InvalidEstimate("x".into()),
        ];
        for err in errors {
            let code = err.code() as u32;
            assert!((11000..12000).contains(&code), "{code}");
        }
    }

    #[test]
    fn test_into_core_error() {
        let core: CoreError = MealError::EmptyCandidateSet { total: 4 }.into();
        assert_eq!(core.code, ErrorCode::EmptyCandidateSet);
        assert!(core.message.contains('4'));

        let core: CoreError = MealError::UnknownGoal("paleo".into()).into();
        assert_eq!(core.code, ErrorCode::UnknownGoal);
        assert!(core.suggestion.is_some());
    }
}
