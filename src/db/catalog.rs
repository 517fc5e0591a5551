use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

use crate::models::Meal;

/// Reads the meal catalog from a JSON array on disk
///
/// A missing file is not an error: the service then runs on the built-in
/// fallback meals. A file that exists but does not parse is.
pub async fn load_catalog(path: impl AsRef<Path>) -> anyhow::Result<Vec<Meal>> {
    let path = path.as_ref();

    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Meal catalog not found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let meals: Vec<Meal> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse meal catalog {}", path.display()))?;

    tracing::info!(path = %path.display(), meals = meals.len(), "Meal catalog loaded");

    Ok(meals)
}
