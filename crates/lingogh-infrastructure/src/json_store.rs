//! Key-value store implementations.
//!
//! [`JsonFileStore`] persists each key as one file beneath a base directory,
//! the way the browser original kept one local-storage entry per plan key.
//! [`InMemoryStore`] backs tests and offline runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use lingogh_core::error::Result;
use lingogh_core::store::KeyValueStore;

/// A store implementation keeping one file per key.
///
/// Values are opaque strings (the plan manager stores JSON documents), so
/// files carry a `.json` extension. Keys are sanitized into filesystem-safe
/// names by [`sanitize_key`].
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates the store, creating `base_dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize_key(key)))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.file_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.file_path(key);
        tokio::fs::write(&path, value).await?;
        tracing::debug!(%key, path = %path.display(), "persisted value");
        Ok(())
    }
}

/// Maps a store key to a filesystem-safe name.
///
/// Every byte outside `[A-Za-z0-9.-]` is written as `_xx` (lowercase hex),
/// `_` included, so distinct keys always map to distinct names.
fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' => out.push(b as char),
            _ => out.push_str(&format!("_{b:02x}")),
        }
    }
    out
}

/// An in-memory store for tests and offline runs.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("plans")).unwrap();

        assert_eq!(store.get("dailyPlan_Spanish_2026-08-07").await.unwrap(), None);

        store
            .set("dailyPlan_Spanish_2026-08-07", "{\"date\":\"2026-08-07\"}")
            .await
            .unwrap();
        assert_eq!(
            store.get("dailyPlan_Spanish_2026-08-07").await.unwrap(),
            Some("{\"date\":\"2026-08-07\"}".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_sanitize_key_is_injective_for_plan_keys() {
        let keys = [
            "dailyPlan_Spanish_2026-08-07",
            "dailyPlan_Spanish_2026-08-08",
            "dailyPlan_French_2026-08-07",
            "dailyPlan_Sp_anish_2026-08-07",
        ];
        let sanitized: HashSet<_> = keys.iter().map(|k| sanitize_key(k)).collect();
        assert_eq!(sanitized.len(), keys.len());
        // underscores themselves are escaped
        assert_eq!(sanitize_key("a_b"), "a_5fb");
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
    }
}
