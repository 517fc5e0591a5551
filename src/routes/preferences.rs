use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{PreferenceSet, Rating},
    routes::{required, AppState},
};

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub user_id: String,
    pub meal_name: String,
    pub rating: Rating,
}

/// Records a like, dislike or neutral rating
pub async fn rate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RatingRequest>, JsonRejection>,
) -> AppResult<Json<PreferenceSet>> {
    let Json(request) = payload?;
    let user_id = required("user_id", &request.user_id)?;
    let meal_name = required("meal_name", &request.meal_name)?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        meal = %meal_name,
        rating = ?request.rating,
        "Recording rating"
    );

    let preferences = state
        .preferences
        .rate(user_id, meal_name, request.rating)
        .await;
    Ok(Json(preferences))
}

pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> AppResult<Json<PreferenceSet>> {
    let user_id = required("user_id", &user_id)?;
    Ok(Json(state.preferences.get(user_id).await))
}

pub async fn clear_preferences(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> AppResult<StatusCode> {
    let user_id = required("user_id", &user_id)?;
    state.preferences.clear(user_id).await;

    tracing::info!(request_id = %request_id, user_id = %user_id, "Preferences cleared");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_preference(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((user_id, meal_name)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let user_id = required("user_id", &user_id)?;
    let meal_name = required("meal_name", &meal_name)?;
    state.preferences.remove(user_id, meal_name).await;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        meal = %meal_name,
        "Preference removed"
    );
    Ok(StatusCode::NO_CONTENT)
}
