use async_trait::async_trait;
use std::fmt;

use crate::types::{
    ArticleBlock, GeneratedArticle, ImageGenAspectRatio, ImageModelTier, ImageResolution,
};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub resolution: ImageResolution,
    pub aspect_ratio: ImageGenAspectRatio,
    pub tier: ImageModelTier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    pub topic: String,
    pub context: String,
    pub use_search: bool,
}

#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Whether a credential is configured. Checked before any request.
    fn has_credential(&self) -> bool;

    /// Restructure raw text into an ordered block sequence
    async fn structure_text(&self, raw_text: &str) -> Result<Vec<ArticleBlock>>;

    /// Synthesize an image, returned as a data URL. `None` when the service
    /// answered without image data.
    async fn generate_image(&self, request: &ImageRequest) -> Result<Option<String>>;

    /// Draft a full article on a topic
    async fn write_article(&self, request: &WriteRequest) -> Result<GeneratedArticle>;
}

/// Interactive credential picker some hosting environments provide.
#[async_trait]
pub trait CredentialSelector: Send + Sync {
    async fn has_selected_key(&self) -> Result<bool>;

    async fn open_select_key(&self) -> Result<()>;
}
