use serde::{Deserialize, Serialize};

use super::Meal;

/// A budget-eligible meal with its compatibility score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub meal: Meal,
    pub score: f64,
}

/// The meal handed back to the caller
///
/// Oracle-confirmed picks carry a justification; fallback picks do not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    #[serde(flatten)]
    pub meal: Meal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_reason: Option<String>,
}

impl RecommendationResult {
    pub fn without_reason(meal: Meal) -> Self {
        Self {
            meal,
            recommendation_reason: None,
        }
    }
}
