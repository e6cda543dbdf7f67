use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use mp_core::{
    ArticleBlock, CredentialSelector, Error, GeneratedArticle, ImageModelTier, ImageRequest,
    InferenceModel, Result, WriteRequest,
};

use crate::wire::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};
use crate::{imaging, structuring, writer, Config};

pub struct GeminiModel {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
    credential_selector: Option<Arc<dyn CredentialSelector>>,
}

impl GeminiModel {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            base_url: config.base_url()?,
            credential_selector: None,
        })
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Arc::new(client);
        self
    }

    /// Attach the host's interactive key picker, consulted before pro-tier
    /// image requests.
    pub fn with_credential_selector(mut self, selector: Arc<dyn CredentialSelector>) -> Self {
        self.credential_selector = Some(selector);
        self
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::MissingCredential)
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self.api_key()?;
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }

    async fn select_pro_credential(&self) -> Result<()> {
        if let Some(selector) = &self.credential_selector {
            if !selector.has_selected_key().await? {
                tracing::info!("Opening credential selection for the pro image model");
                selector.open_select_key().await?;
            }
        }
        Ok(())
    }
}

fn logged<T>(what: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::error!("Gemini {} error: {}", what, e);
    }
    result
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("credential_selector", &self.credential_selector.is_some())
            .finish()
    }
}

#[async_trait]
impl InferenceModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn structure_text(&self, raw_text: &str) -> Result<Vec<ArticleBlock>> {
        let result: Result<Vec<ArticleBlock>> = async {
            let request = structuring::build_request(raw_text);
            let response = self.generate(structuring::STRUCTURE_MODEL, &request).await?;
            structuring::parse_blocks(&response.text())
        }
        .await;
        logged("processing", result)
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<Option<String>> {
        let result: Result<Option<String>> = async {
            if request.tier == ImageModelTier::Pro {
                self.select_pro_credential().await?;
            }
            let body = imaging::build_request(request);
            let response = self.generate(imaging::model_for(request.tier), &body).await?;
            let image = imaging::extract_image(&response);
            if image.is_none() {
                tracing::warn!("Image model answered without image data");
            }
            Ok(image)
        }
        .await;
        logged("image generation", result)
    }

    async fn write_article(&self, request: &WriteRequest) -> Result<GeneratedArticle> {
        let result: Result<GeneratedArticle> = async {
            let body = writer::build_request(request);
            let response = self.generate(writer::WRITER_MODEL, &body).await?;
            let sources = writer::collect_sources(&response);
            Ok(writer::finish_article(&response.text(), sources))
        }
        .await;
        logged("article generation", result)
    }
}
