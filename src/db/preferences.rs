use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::RwLock;

use crate::models::{PreferenceSet, Rating};

type Users = HashMap<String, PreferenceSet>;

/// Rating history keyed by user id
///
/// Cloning is cheap; clones share the same underlying map. A store opened with
/// [`PreferenceStore::load`] writes the whole map back to its file after every
/// change.
#[derive(Clone, Debug, Default)]
pub struct PreferenceStore {
    inner: Arc<RwLock<Users>>,
    path: Option<Arc<PathBuf>>,
}

impl PreferenceStore {
    /// Creates a store that lives only as long as the process
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a file-backed store
    ///
    /// A missing file starts an empty history; a file that does not parse is an error.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let users: Users = match tokio::fs::read_to_string(path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse preferences {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No stored preferences, starting empty");
                Users::new()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        tracing::info!(path = %path.display(), users = users.len(), "Preferences loaded");

        Ok(Self {
            inner: Arc::new(RwLock::new(users)),
            path: Some(Arc::new(path.to_path_buf())),
        })
    }

    /// Returns the user's history, empty for unknown users
    pub async fn get(&self, user_id: &str) -> PreferenceSet {
        self.inner
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Records a rating and returns the updated history
    pub async fn rate(&self, user_id: &str, meal_name: &str, rating: Rating) -> PreferenceSet {
        let mut users = self.inner.write().await;
        let preferences = users.entry(user_id.to_string()).or_default();
        preferences.rate(meal_name, rating);
        let updated = preferences.clone();

        tracing::debug!(
            user_id = %user_id,
            meal = %meal_name,
            rating = ?rating,
            "Rating recorded"
        );

        self.persist(&users).await;
        updated
    }

    /// Drops one meal from the user's history
    pub async fn remove(&self, user_id: &str, meal_name: &str) {
        let mut users = self.inner.write().await;
        if let Some(preferences) = users.get_mut(user_id) {
            preferences.remove(meal_name);
            if preferences.is_empty() {
                users.remove(user_id);
            }
            self.persist(&users).await;
        }
    }

    /// Forgets everything about the user
    pub async fn clear(&self, user_id: &str) {
        let mut users = self.inner.write().await;
        if users.remove(user_id).is_some() {
            self.persist(&users).await;
        }
    }

    /// Writes the full map to disk while the caller holds the write lock
    ///
    /// Failures are logged; the in-memory state stays authoritative.
    async fn persist(&self, users: &Users) {
        let Some(path) = self.path.as_deref() else {
            return;
        };

        if let Err(e) = write_users(path, users).await {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Failed to persist preferences"
            );
        }
    }
}

/// Replaces the file through a sibling temp file so readers never see a partial write
async fn write_users(path: &Path, users: &Users) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(users).context("Failed to serialize preferences")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, raw)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("preferences-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_unknown_user_is_empty() {
        let store = PreferenceStore::new();
        assert!(block_on(store.get("nobody")).is_empty());
    }

    #[test]
    fn test_rerating_moves_meal() {
        let store = PreferenceStore::new();
        block_on(store.rate("u1", "Tacos", Rating::Like));
        let preferences = block_on(store.rate("u1", "Tacos", Rating::Dislike));

        assert!(preferences.liked.is_empty());
        assert_eq!(preferences.disliked.len(), 1);
        assert_eq!(preferences.disliked[0].name(), "Tacos");
    }

    #[test]
    fn test_clones_share_state() {
        let store = PreferenceStore::new();
        let other = store.clone();
        block_on(store.rate("u1", "Pho", Rating::Neutral));

        assert_eq!(block_on(other.get("u1")).neutral.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let store = PreferenceStore::new();
        block_on(store.rate("u1", "Tacos", Rating::Like));
        block_on(store.rate("u1", "Pho", Rating::Like));

        block_on(store.remove("u1", "Tacos"));
        let preferences = block_on(store.get("u1"));
        assert_eq!(preferences.liked.len(), 1);
        assert_eq!(preferences.liked[0].name(), "Pho");

        block_on(store.clear("u1"));
        assert!(block_on(store.get("u1")).is_empty());
    }

    #[test]
    fn test_users_are_isolated() {
        let store = PreferenceStore::new();
        block_on(store.rate("u1", "Tacos", Rating::Like));
        assert!(block_on(store.get("u2")).is_empty());
    }

    #[tokio::test]
    async fn test_history_survives_reload() {
        let path = temp_path();

        let store = PreferenceStore::load(&path).await.unwrap();
        assert!(store.get("u1").await.is_empty());

        store.rate("u1", "Tacos", Rating::Like).await;
        store.rate("u1", "Pho", Rating::Dislike).await;
        store.rate("u2", "Sushi Roll", Rating::Neutral).await;
        store.remove("u1", "Pho").await;
        store.clear("u2").await;

        let reopened = PreferenceStore::load(&path).await.unwrap();
        let preferences = reopened.get("u1").await;
        std::fs::remove_file(&path).unwrap();

        assert_eq!(preferences, store.get("u1").await);
        assert_eq!(preferences.liked.len(), 1);
        assert_eq!(preferences.liked[0].name(), "Tacos");
        assert!(preferences.disliked.is_empty());
        assert!(reopened.get("u2").await.is_empty());
    }

    #[tokio::test]
    async fn test_loads_bare_name_entries() {
        let path = temp_path();
        std::fs::write(
            &path,
            r#"{"u1": {"liked": ["Margherita Pizza"], "disliked": [{"name": "Tacos", "price": 0}]}}"#,
        )
        .unwrap();

        let store = PreferenceStore::load(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        let preferences = store.get("u1").await;
        assert_eq!(preferences.liked[0].name(), "Margherita Pizza");
        assert_eq!(preferences.disliked[0].name(), "Tacos");
        assert!(preferences.neutral.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_preferences_fail() {
        let path = temp_path();
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let result = PreferenceStore::load(&path).await;
        std::fs::remove_file(&path).unwrap();

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse preferences"));
    }
}
