use async_trait::async_trait;

use crate::types::GeneratedArticle;
use crate::Result;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the stored history, newest first. Unreadable data yields an empty list.
    async fn load(&self) -> Result<Vec<GeneratedArticle>>;

    /// Replace the stored history with `articles`
    async fn save(&self, articles: &[GeneratedArticle]) -> Result<()>;
}
