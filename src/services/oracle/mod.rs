//! External recommendation oracle abstraction
//!
//! The oracle is asked to pick one meal from a scored shortlist. It is treated as
//! unreliable, so callers must cope with failures, timeouts, malformed answers and
//! answers naming meals that were never offered.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub mod openai;

pub use openai::OpenAiOracle;

/// Everything the oracle gets to see about one request
#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    pub budget: f64,
    /// One-line summary of the user's rating history
    pub preference_analysis: String,
    /// Numbered description of the shortlisted meals
    pub meals_context: String,
    /// Names the oracle is allowed to choose from, best first
    pub shortlist: Vec<String>,
}

/// The oracle's pick
///
/// Any other echoed meal fields in the response are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OracleSelection {
    pub name: String,
    #[serde(default)]
    pub recommendation_reason: Option<String>,
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    #[error("Oracle did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Malformed oracle response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for OracleError {
    fn from(error: reqwest::Error) -> Self {
        OracleError::Unavailable(error.to_string())
    }
}

/// Trait for meal recommendation oracles
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MealOracle: Send + Sync {
    /// Asks for a single meal out of `request.shortlist`
    async fn select_meal(&self, request: &OracleRequest) -> Result<OracleSelection, OracleError>;

    /// Oracle name for logging and debugging
    fn name(&self) -> &'static str;
}
