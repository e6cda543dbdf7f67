use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::image_tag::{format_tag, image_id, tag_index};
use crate::types::{ArticleBlock, ImageAsset};
use crate::{Error, Result};

/// Append-only list of images. An asset's id is fixed from its position at
/// creation and is never handed out twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageTable {
    assets: Vec<ImageAsset>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, preview_data: impl Into<String>, source_file: Option<PathBuf>) -> &ImageAsset {
        let asset = ImageAsset {
            id: image_id(self.assets.len() + 1),
            source_file,
            preview_data: preview_data.into(),
        };
        tracing::debug!("Registered image {}", asset.id);
        self.assets.push(asset);
        &self.assets[self.assets.len() - 1]
    }

    /// Tag the next appended asset will be reachable by.
    pub fn next_tag(&self) -> String {
        format_tag(self.assets.len() + 1)
    }

    /// Preview data for `tag`, or `None` when it does not point at an asset.
    pub fn resolve_tag(&self, tag: &str) -> Option<&str> {
        let index = tag_index(tag)?;
        self.assets.get(index).map(|asset| asset.preview_data.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&ImageAsset> {
        self.assets.iter().find(|asset| asset.id == id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageAsset> {
        self.assets.iter()
    }

    pub fn as_slice(&self) -> &[ImageAsset] {
        &self.assets
    }
}

/// Structured article content plus the images it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<ArticleBlock>,
    pub images: ImageTable,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[ArticleBlock] {
        &self.blocks
    }

    /// Swaps in a whole new block sequence.
    pub fn replace_blocks(&mut self, blocks: Vec<ArticleBlock>) {
        self.blocks = blocks;
    }

    pub fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.images = ImageTable::new();
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Splits a base64 data URL into its mime type and decoded bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| Error::Parse("not a data URL".to_string()))?;
    let (meta, data) = rest
        .split_once(',')
        .ok_or_else(|| Error::Parse("data URL has no payload".to_string()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| Error::Parse("data URL is not base64 encoded".to_string()))?;
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| Error::Parse(format!("invalid base64 payload: {}", e)))?;
    Ok((mime.to_string(), bytes))
}

/// Reads a local image and inline-encodes it as a data URL.
pub async fn load_image_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(encode_data_url(mime_for(path), &bytes))
}
