use std::sync::Arc;

use mealmate_api::{
    config::Config,
    db::{load_catalog, PreferenceStore},
    routes::{create_router, AppState},
    services::{OpenAiOracle, Recommender},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mealmate_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let catalog = load_catalog(&config.meals_file).await?;
    let preferences = PreferenceStore::load(&config.preferences_file).await?;

    // The catalog file doubles as the fallback catalog
    let mut recommender = Recommender::new(catalog.clone());
    match config.oracle() {
        Some(oracle_config) => {
            let timeout = oracle_config.timeout;
            tracing::info!(model = %oracle_config.model, "Oracle enabled");
            recommender = recommender.with_oracle(Arc::new(OpenAiOracle::new(oracle_config)), timeout);
        }
        None => tracing::warn!("OPENAI_API_KEY not set, serving top-ranked meals only"),
    }

    let state = Arc::new(AppState {
        catalog,
        preferences,
        recommender,
    });
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
