use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mp_core::Result;
use mp_render::{render_page, PreEscaped};

/// Rich-paste payload: the rendered HTML fragment plus its plain-text
/// equivalent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub title: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write(&self, payload: &ClipboardPayload) -> Result<()>;
}

/// Writes `preview.html` (standalone page) and `preview.txt` into a directory.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    dir: PathBuf,
}

impl FileClipboard {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn html_path(&self) -> PathBuf {
        self.dir.join("preview.html")
    }

    pub fn text_path(&self) -> PathBuf {
        self.dir.join("preview.txt")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl Clipboard for FileClipboard {
    async fn write(&self, payload: &ClipboardPayload) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let page = render_page(&payload.title, &PreEscaped(payload.html.clone()));
        tokio::fs::write(self.html_path(), page.into_string()).await?;
        tokio::fs::write(self.text_path(), &payload.text).await?;
        tracing::info!("Wrote preview to {}", self.dir.display());
        Ok(())
    }
}
