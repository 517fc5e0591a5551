use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::RecommendationResult,
    routes::{required, AppState},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: String,
    pub budget: f64,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResult>> {
    let Json(request) = payload?;
    let user_id = required("user_id", &request.user_id)?;
    if !request.budget.is_finite() || request.budget <= 0.0 {
        return Err(AppError::InvalidInput(
            "budget must be a positive number".to_string(),
        ));
    }

    let preferences = state.preferences.get(user_id).await;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        budget = request.budget,
        liked = preferences.liked.len(),
        disliked = preferences.disliked.len(),
        "Processing recommendation request"
    );

    let result = state
        .recommender
        .recommend(&state.catalog, request.budget, &preferences)
        .await;

    tracing::info!(
        request_id = %request_id,
        meal = %result.meal.name,
        "Recommendation served"
    );

    Ok(Json(result))
}
