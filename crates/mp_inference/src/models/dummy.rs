use std::fmt;

use mp_core::image_tag::split_tags;
use mp_core::image_tag::Segment;
use mp_core::{ArticleBlock, BlockKind, GeneratedArticle, ImageRequest, InferenceModel, Result, WriteRequest};

use crate::writer;

/// 1x1 transparent PNG.
const PLACEHOLDER_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Offline model that structures text with markdown-ish line rules. Useful
/// without a credential and in tests.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

fn is_numbered(line: &str) -> bool {
    match line.split_once(". ") {
        Some((number, _)) => !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

fn classify(line: &str) -> ArticleBlock {
    if let Some(rest) = line.strip_prefix("### ") {
        return ArticleBlock::new(BlockKind::Subheading, rest.trim());
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return ArticleBlock::new(BlockKind::Heading, rest.trim());
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return ArticleBlock::new(BlockKind::Title, rest.trim());
    }
    if let Some(rest) = line.strip_prefix("> ") {
        return ArticleBlock::new(BlockKind::Quote, rest.trim());
    }
    if is_numbered(line) {
        return ArticleBlock::new(BlockKind::ListItem, line);
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return ArticleBlock::new(BlockKind::ListItem, rest.trim());
    }
    if let [Segment::Tag(tag)] = split_tags(line).as_slice() {
        return ArticleBlock::new(BlockKind::ImagePlaceholder, *tag);
    }
    ArticleBlock::new(BlockKind::Paragraph, line).with_emphasis(false)
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    fn has_credential(&self) -> bool {
        true
    }

    async fn structure_text(&self, raw_text: &str) -> Result<Vec<ArticleBlock>> {
        Ok(raw_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(classify)
            .collect())
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<Option<String>> {
        if request.prompt.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(format!("data:image/png;base64,{}", PLACEHOLDER_PNG)))
    }

    async fn write_article(&self, request: &WriteRequest) -> Result<GeneratedArticle> {
        let mut text = format!("# {}\n\n", request.topic.trim());
        if !request.context.trim().is_empty() {
            text.push_str(&format!("{}\n\n", request.context.trim()));
        }
        text.push_str("## Key points\n\n1. Why it matters\n2. What changes\n3. What to do next");
        Ok(writer::finish_article(&text, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::{ImageGenAspectRatio, ImageModelTier, ImageResolution};

    #[tokio::test]
    async fn test_structure_text_line_rules() {
        let model = DummyModel::new();
        let blocks = model
            .structure_text("# Title\n\n## Part\n### Sub\n> quoted\n1. first\n- loose\n[IMG-1]\nplain [IMG-2] text")
            .await
            .unwrap();

        let kinds: Vec<_> = blocks.iter().map(|b| b.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Title,
                BlockKind::Heading,
                BlockKind::Subheading,
                BlockKind::Quote,
                BlockKind::ListItem,
                BlockKind::ListItem,
                BlockKind::ImagePlaceholder,
                BlockKind::Paragraph,
            ]
        );
        assert_eq!(blocks[4].content, "1. first");
        assert_eq!(blocks[5].content, "loose");
        assert_eq!(blocks[6].content, "[IMG-1]");
    }

    #[tokio::test]
    async fn test_generate_image() {
        let model = DummyModel::new();
        let mut request = ImageRequest {
            prompt: "cat".to_string(),
            resolution: ImageResolution::OneK,
            aspect_ratio: ImageGenAspectRatio::Square,
            tier: ImageModelTier::Flash,
        };
        assert!(model.generate_image(&request).await.unwrap().unwrap().starts_with("data:image/png;base64,"));

        request.prompt = "  ".to_string();
        assert!(model.generate_image(&request).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_article_uses_topic_as_title() {
        let model = DummyModel::new();
        let article = model
            .write_article(&WriteRequest {
                topic: "Sleep".to_string(),
                context: "for parents".to_string(),
                use_search: true,
            })
            .await
            .unwrap();
        assert_eq!(article.title, "Sleep");
        assert!(article.content.starts_with("for parents"));
        assert!(article.sources.is_empty());
    }
}
