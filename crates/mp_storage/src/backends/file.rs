use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mp_core::{GeneratedArticle, HistoryStore, Result};

/// History stored as a single JSON array in one file, rewritten in full on
/// every save.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> Result<Vec<GeneratedArticle>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(crate::decode_history(&raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => {
                tracing::warn!("Failed to read history at {}: {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, articles: &[GeneratedArticle]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_string(articles)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!("Saved {} history entries to {}", articles.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::SearchSource;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileHistoryStore::new(dir.path().join("nested").join("history.json"));
        assert!(store.load().await.unwrap().is_empty());

        let articles = vec![GeneratedArticle::new(
            "Title",
            "Body",
            vec![SearchSource {
                title: "Ex".to_string(),
                uri: "https://ex.com".to_string(),
            }],
        )];
        store.save(&articles).await.unwrap();
        assert_eq!(store.load().await.unwrap(), articles);
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "definitely not json").unwrap();

        let store = FileHistoryStore::new(&path);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_records_written_by_browser_build() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"[{"id":"a1","timestamp":1700000000000,"title":"T","content":"C","sources":[]}]"#,
        )
        .unwrap();

        let loaded = FileHistoryStore::new(&path).load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].timestamp.timestamp_millis(), 1_700_000_000_000);
    }
}
