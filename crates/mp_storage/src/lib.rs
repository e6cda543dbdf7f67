use std::path::PathBuf;
use std::sync::Arc;

use mp_core::{Error, HistoryStore, Result};

pub mod backends;

pub use backends::*;

/// Storage key the history lives under.
pub const HISTORY_KEY: &str = "wechat_editor_history";

pub fn default_history_path() -> PathBuf {
    PathBuf::from("data").join(format!("{}.json", HISTORY_KEY))
}

/// Builds the history backend named by `kind`: `memory`, `file`, or (with the
/// `sqlite` feature) `sqlite`. `path` overrides the backend's default location.
pub async fn create_storage(kind: &str, path: Option<PathBuf>) -> Result<Arc<dyn HistoryStore>> {
    let store: Arc<dyn HistoryStore> = match kind {
        "memory" => Arc::new(MemoryHistoryStore::new()),
        "file" => Arc::new(FileHistoryStore::new(path.unwrap_or_else(default_history_path))),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let path = path.unwrap_or_else(|| PathBuf::from("data").join("history.db"));
            Arc::new(SQLiteHistoryStore::new_with_path(&path).await?)
        }
        other => {
            return Err(Error::Storage(format!(
                "unknown storage backend '{}'. Available backends: {}",
                other,
                available_backends().join(", ")
            )))
        }
    };
    Ok(store)
}

pub fn available_backends() -> Vec<&'static str> {
    let mut backends = vec!["memory", "file"];
    if cfg!(feature = "sqlite") {
        backends.push("sqlite");
    }
    backends
}

/// Decodes a stored history value. Anything unreadable is treated as an
/// empty history.
pub(crate) fn decode_history(raw: &str) -> Vec<mp_core::GeneratedArticle> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(raw) {
        Ok(articles) => articles,
        Err(e) => {
            tracing::warn!("Failed to parse history, starting empty: {}", e);
            Vec::new()
        }
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, HISTORY_KEY};
    pub use mp_core::HistoryStore;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_storage_by_kind() {
        assert!(create_storage("memory", None).await.is_ok());
        let dir = tempfile::tempdir().unwrap();
        assert!(create_storage("file", Some(dir.path().join("h.json"))).await.is_ok());
        assert!(matches!(create_storage("qdrant", None).await, Err(Error::Storage(_))));
    }

    #[test]
    fn test_decode_history_tolerates_garbage() {
        assert!(decode_history("").is_empty());
        assert!(decode_history("{not json").is_empty());
        assert!(decode_history(r#"{"id":"x"}"#).is_empty());
    }
}
