use async_trait::async_trait;
use mp_core::{GeneratedArticle, HistoryStore, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps the serialized history in memory, mirroring how the file and
/// sqlite backends store one JSON value.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    value: Arc<RwLock<Option<String>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the raw stored value, as if written by an earlier session.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Arc::new(RwLock::new(Some(raw.into()))),
        }
    }

    pub async fn raw(&self) -> Option<String> {
        self.value.read().await.clone()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self) -> Result<Vec<GeneratedArticle>> {
        let value = self.value.read().await;
        Ok(value.as_deref().map(crate::decode_history).unwrap_or_default())
    }

    async fn save(&self, articles: &[GeneratedArticle]) -> Result<()> {
        let raw = serde_json::to_string(articles)?;
        *self.value.write().await = Some(raw);
        Ok(())
    }
}
