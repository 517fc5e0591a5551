use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::PreferenceStore;
use crate::error::{AppError, AppResult};
use crate::middleware::{make_span_with_request_id, request_id_middleware};
use crate::models::Meal;
use crate::services::recommendation::Recommender;

pub mod preferences;
pub mod recommendations;

/// Shared handler state
pub struct AppState {
    /// Catalog snapshot recommendations are drawn from
    pub catalog: Vec<Meal>,
    pub preferences: PreferenceStore,
    pub recommender: Recommender,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/ratings", post(preferences::rate))
        .route(
            "/users/:user_id/preferences",
            get(preferences::get_preferences).delete(preferences::clear_preferences),
        )
        .route(
            "/users/:user_id/preferences/:meal_name",
            delete(preferences::remove_preference),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Trimmed `value`, rejecting blank input
fn required<'a>(field: &str, value: &'a str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::InvalidInput(format!("{field} must not be blank")));
    }
    Ok(value)
}
