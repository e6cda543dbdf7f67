use crate::types::GeneratedArticle;

pub const HISTORY_CAPACITY: usize = 50;

/// Newest-first list of drafted articles, bounded to `HISTORY_CAPACITY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<GeneratedArticle>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Builds a history from stored entries, dropping anything past capacity.
    pub fn from_entries(mut entries: Vec<GeneratedArticle>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    pub fn push(&mut self, article: GeneratedArticle) {
        self.entries.insert(0, article);
        if self.entries.len() > HISTORY_CAPACITY {
            let evicted = self.entries.len() - HISTORY_CAPACITY;
            self.entries.truncate(HISTORY_CAPACITY);
            tracing::debug!("Evicted {} oldest history entries", evicted);
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<GeneratedArticle> {
        let index = self.entries.iter().position(|a| a.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&GeneratedArticle> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn entries(&self) -> &[GeneratedArticle] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
