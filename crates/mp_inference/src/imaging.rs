use mp_core::{ImageModelTier, ImageRequest};

use crate::wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig};

pub const FLASH_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const PRO_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
const DEFAULT_IMAGE_MIME: &str = "image/png";

pub fn model_for(tier: ImageModelTier) -> &'static str {
    match tier {
        ImageModelTier::Flash => FLASH_IMAGE_MODEL,
        ImageModelTier::Pro => PRO_IMAGE_MODEL,
    }
}

/// Only the pro tier accepts an output resolution.
pub fn build_request(request: &ImageRequest) -> GenerateContentRequest {
    let image_size = match request.tier {
        ImageModelTier::Pro => Some(request.resolution.to_string()),
        ImageModelTier::Flash => None,
    };
    GenerateContentRequest {
        contents: vec![Content {
            role: None,
            ..Content::user(request.prompt.clone())
        }],
        generation_config: Some(GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio: request.aspect_ratio.to_string(),
                image_size,
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Data URL of the first inline image in the response, if any.
pub fn extract_image(response: &GenerateContentResponse) -> Option<String> {
    let inline = response.first_inline_data()?;
    if inline.data.is_empty() {
        return None;
    }
    let mime = inline.mime_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME);
    Some(format!("data:{};base64,{}", mime, inline.data))
}
