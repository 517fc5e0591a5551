use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::models::{Meal, PreferenceSet, RecommendationResult};
use crate::services::fallback::fallback_meal;
use crate::services::oracle::{MealOracle, OracleError, OracleRequest};
use crate::services::preferences::PreferenceProfile;
use crate::services::prompt::{meals_context, preference_analysis};
use crate::services::ranking::{rank, NoAffordableMeals, Ranking};

/// Why the oracle's answer was not used
///
/// Never surfaced to callers; each variant routes to the fallback path and is
/// only visible in logs.
#[derive(Debug, Error)]
pub enum FallbackReason {
    #[error(transparent)]
    NoAffordableMeals(#[from] NoAffordableMeals),

    #[error("No oracle configured")]
    OracleDisabled,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("Oracle chose {0:?}, which is not on the shortlist")]
    OutOfShortlist(String),
}

impl FallbackReason {
    /// Stable label for log filtering
    pub fn kind(&self) -> &'static str {
        match self {
            FallbackReason::NoAffordableMeals(_) => "no_affordable_meals",
            FallbackReason::OracleDisabled => "oracle_disabled",
            FallbackReason::Oracle(OracleError::Unavailable(_)) => "oracle_unavailable",
            FallbackReason::Oracle(OracleError::Timeout(_)) => "oracle_timeout",
            FallbackReason::Oracle(OracleError::Malformed(_)) => "oracle_malformed",
            FallbackReason::OutOfShortlist(_) => "oracle_out_of_shortlist",
        }
    }
}

/// Picks one meal per request, consulting the oracle when one is configured
///
/// `recommend` is total: every oracle problem, and an empty or unaffordable
/// catalog, resolves to a deterministic fallback meal.
pub struct Recommender {
    oracle: Option<Arc<dyn MealOracle>>,
    oracle_timeout: Duration,
    /// Catalog ranked when the request's own catalog has nothing affordable
    default_catalog: Vec<Meal>,
}

impl Recommender {
    /// Creates a recommender without an oracle
    pub fn new(default_catalog: Vec<Meal>) -> Self {
        Self {
            oracle: None,
            oracle_timeout: Duration::ZERO,
            default_catalog,
        }
    }

    /// Consults `oracle` for the final pick, giving up after `timeout`
    pub fn with_oracle(mut self, oracle: Arc<dyn MealOracle>, timeout: Duration) -> Self {
        self.oracle = Some(oracle);
        self.oracle_timeout = timeout;
        self
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    /// Recommends a single meal within `budget`
    pub async fn recommend(
        &self,
        catalog: &[Meal],
        budget: f64,
        preferences: &PreferenceSet,
    ) -> RecommendationResult {
        let start = Instant::now();

        let ranking = match rank(catalog, budget, preferences) {
            Ok(ranking) => ranking,
            Err(e) => return self.fallback(None, budget, preferences, e.into()),
        };

        let result = match self.consult_oracle(&ranking, budget, preferences).await {
            Ok(result) => result,
            Err(reason) => self.fallback(Some(&ranking), budget, preferences, reason),
        };

        tracing::info!(
            meal = %result.meal.name,
            price = result.meal.price,
            justified = result.recommendation_reason.is_some(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendation completed"
        );

        result
    }

    /// Single oracle attempt, validated against the shortlist
    async fn consult_oracle(
        &self,
        ranking: &Ranking,
        budget: f64,
        preferences: &PreferenceSet,
    ) -> Result<RecommendationResult, FallbackReason> {
        let oracle = self.oracle.as_ref().ok_or(FallbackReason::OracleDisabled)?;

        let profile = PreferenceProfile::from_preferences(preferences);
        let shortlist = ranking.shortlist();
        let request = OracleRequest {
            budget,
            preference_analysis: preference_analysis(&profile),
            meals_context: meals_context(&shortlist),
            shortlist: shortlist.iter().map(|c| c.meal.name.clone()).collect(),
        };

        tracing::debug!(
            provider = oracle.name(),
            candidates = request.shortlist.len(),
            "Consulting oracle"
        );

        let selection = tokio::time::timeout(self.oracle_timeout, oracle.select_meal(&request))
            .await
            .map_err(|_| OracleError::Timeout(self.oracle_timeout))??;

        let chosen = shortlist
            .iter()
            .find(|candidate| candidate.meal.name == selection.name)
            .ok_or_else(|| FallbackReason::OutOfShortlist(selection.name.clone()))?;

        Ok(RecommendationResult {
            meal: chosen.meal.clone(),
            recommendation_reason: selection.recommendation_reason,
        })
    }

    fn fallback(
        &self,
        ranking: Option<&Ranking>,
        budget: f64,
        preferences: &PreferenceSet,
        reason: FallbackReason,
    ) -> RecommendationResult {
        let meal = match ranking {
            Some(ranking) => ranking.top().meal.clone(),
            None => fallback_meal(&self.default_catalog, budget, preferences),
        };

        match reason {
            FallbackReason::OracleDisabled => tracing::debug!(
                meal = %meal.name,
                "No oracle configured, using top-ranked meal"
            ),
            _ => tracing::warn!(
                reason = reason.kind(),
                error = %reason,
                meal = %meal.name,
                "Falling back to deterministic recommendation"
            ),
        }

        RecommendationResult::without_reason(meal)
    }
}
