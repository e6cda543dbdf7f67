use async_trait::async_trait;
use mp_core::{ArticleBlock, Error, GeneratedArticle, ImageRequest, InferenceModel, Result, WriteRequest};

/// Model whose every request fails.
#[derive(Debug)]
pub(crate) struct FailingModel {
    pub credential: bool,
}

#[async_trait]
impl InferenceModel for FailingModel {
    fn name(&self) -> &str {
        "Failing"
    }

    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn structure_text(&self, _raw_text: &str) -> Result<Vec<ArticleBlock>> {
        Err(Error::Parse("not an array".to_string()))
    }

    async fn generate_image(&self, _request: &ImageRequest) -> Result<Option<String>> {
        Ok(None)
    }

    async fn write_article(&self, _request: &WriteRequest) -> Result<GeneratedArticle> {
        Err(Error::Api {
            status: 500,
            message: "boom".to_string(),
        })
    }
}

/// Model whose requests never complete.
#[derive(Debug)]
pub(crate) struct HangingModel;

#[async_trait]
impl InferenceModel for HangingModel {
    fn name(&self) -> &str {
        "Hanging"
    }

    fn has_credential(&self) -> bool {
        true
    }

    async fn structure_text(&self, _raw_text: &str) -> Result<Vec<ArticleBlock>> {
        std::future::pending().await
    }

    async fn generate_image(&self, _request: &ImageRequest) -> Result<Option<String>> {
        std::future::pending().await
    }

    async fn write_article(&self, _request: &WriteRequest) -> Result<GeneratedArticle> {
        std::future::pending().await
    }
}
