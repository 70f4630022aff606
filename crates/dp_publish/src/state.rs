//! JSON-file persistence for the set of already-published post ids.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use dp_core::{PublishState, PublishedSet, Result};

/// Stores the published-id set as a JSON array of strings. An absent
/// or unreadable file loads as an empty set; the run then proceeds as
/// if nothing had been published yet.
pub struct JsonStateFile {
    path: PathBuf,
}

impl JsonStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PublishState for JsonStateFile {
    async fn load(&self) -> Result<PublishedSet> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PublishedSet::new());
            }
            Err(e) => {
                warn!("state file {} is unreadable: {}", self.path.display(), e);
                return Ok(PublishedSet::new());
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => Ok(ids.into_iter().collect()),
            Err(e) => {
                warn!(
                    "state file {} is corrupted ({}), starting from an empty set",
                    self.path.display(),
                    e
                );
                Ok(PublishedSet::new())
            }
        }
    }

    async fn save(&self, ids: &PublishedSet) -> Result<()> {
        // Sorted so saving the same membership twice writes identical bytes.
        let mut ids: Vec<&String> = ids.iter().collect();
        ids.sort();
        let json = serde_json::to_string(&ids)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = JsonStateFile::new(dir.path().join("published.json"));
        assert!(state.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("published.json");
        tokio::fs::write(&path, "{not valid json").await.unwrap();
        let state = JsonStateFile::new(&path);
        assert!(state.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let state = JsonStateFile::new(dir.path().join("published.json"));

        let ids: PublishedSet = ["7".to_string(), "3".to_string()].into_iter().collect();
        state.save(&ids).await.unwrap();
        assert_eq!(state.load().await.unwrap(), ids);

        let raw = tokio::fs::read_to_string(state.path()).await.unwrap();
        assert_eq!(raw, r#"["3","7"]"#);
    }

    #[tokio::test]
    async fn test_save_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let state = JsonStateFile::new(dir.path().join("published.json"));

        let ids: PublishedSet = ["b".to_string(), "a".to_string(), "c".to_string()]
            .into_iter()
            .collect();
        state.save(&ids).await.unwrap();
        let first = tokio::fs::read(state.path()).await.unwrap();
        state.save(&ids).await.unwrap();
        let second = tokio::fs::read(state.path()).await.unwrap();
        assert_eq!(first, second);
    }
}
