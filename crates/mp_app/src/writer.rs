use std::sync::Arc;

use mp_core::{GeneratedArticle, History, HistoryStore, InferenceModel, WriteRequest};

use crate::busy::BusyGuard;
use crate::editor::EditorSession;
use crate::notice::Notice;

/// The writer half of the app: drafts articles from a topic and keeps every
/// draft in a persisted history.
pub struct WriterSession {
    pub topic: String,
    pub context: String,
    pub use_search: bool,
    current: Option<GeneratedArticle>,
    history: History,
    store: Arc<dyn HistoryStore>,
    writing: bool,
}

impl WriterSession {
    /// Opens a session on whatever history `store` already holds.
    pub async fn open(store: Arc<dyn HistoryStore>) -> mp_core::Result<Self> {
        let history = History::from_entries(store.load().await?);
        tracing::debug!("Loaded {} history entries", history.len());
        Ok(Self {
            topic: String::new(),
            context: String::new(),
            use_search: true,
            current: None,
            history,
            store,
            writing: false,
        })
    }

    pub fn current(&self) -> Option<&GeneratedArticle> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_writing(&self) -> bool {
        self.writing
    }

    async fn persist(&self) {
        if let Err(e) = self.store.save(self.history.entries()).await {
            tracing::warn!("Failed to save history: {}", e);
        }
    }

    pub async fn write(&mut self, model: &dyn InferenceModel) -> Result<&GeneratedArticle, Notice> {
        if self.topic.trim().is_empty() {
            return Err(Notice::TopicMissing);
        }
        if !model.has_credential() {
            return Err(Notice::MissingCredential);
        }
        if self.writing {
            return Err(Notice::Busy("writing"));
        }

        let request = WriteRequest {
            topic: self.topic.clone(),
            context: self.context.clone(),
            use_search: self.use_search,
        };

        self.current = None;
        let result = {
            let _busy = BusyGuard::raise(&mut self.writing);
            model.write_article(&request).await
        };

        let article = match result {
            Ok(article) => article,
            Err(e) => {
                tracing::error!("Writing failed: {}", e);
                return Err(Notice::WriteFailed);
            }
        };

        tracing::info!("Wrote '{}' with {} sources", article.title, article.sources.len());
        self.history.push(article.clone());
        self.persist().await;
        Ok(self.current.insert(article))
    }

    /// Makes a history entry current and copies its title into the topic.
    pub fn load(&mut self, id: &str) -> Result<&GeneratedArticle, Notice> {
        let article = self
            .history
            .get(id)
            .cloned()
            .ok_or_else(|| Notice::EntryNotFound(id.to_string()))?;
        self.topic = article.title.clone();
        Ok(self.current.insert(article))
    }

    pub async fn delete(&mut self, id: &str) -> Result<GeneratedArticle, Notice> {
        let removed = self
            .history
            .remove(id)
            .ok_or_else(|| Notice::EntryNotFound(id.to_string()))?;
        if self.current.as_ref().is_some_and(|current| current.id == id) {
            self.current = None;
        }
        self.persist().await;
        Ok(removed)
    }

    /// Hands the current article to the editor as `# {title}` plus body.
    /// Returns `false` when there is nothing to import.
    pub fn import_to_editor(&self, editor: &mut EditorSession) -> bool {
        match &self.current {
            Some(article) => {
                editor.set_text(format!("# {}\n\n{}", article.title, article.content));
                true
            }
            None => false,
        }
    }
}
