//! Prompt, schema and response parsing for turning raw text into blocks.

use serde_json::{json, Value};

use mp_core::{ArticleBlock, BlockKind, Error, Result};

use crate::wire::{GenerateContentRequest, GenerationConfig};

pub const STRUCTURE_MODEL: &str = "gemini-2.5-flash";
const STRUCTURE_TEMPERATURE: f32 = 0.2;

pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "type": {
                    "type": "STRING",
                    "enum": BlockKind::KNOWN,
                    "description": "The type of the content block."
                },
                "content": {
                    "type": "STRING",
                    "description": "The text content."
                },
                "isEmphasis": {
                    "type": "BOOLEAN",
                    "description": "Very rarely true. Only for definitions or critical warnings."
                },
                "isGoldenQuote": {
                    "type": "BOOLEAN",
                    "description": "True ONLY for famous quotes. Max 1 per article."
                }
            },
            "required": ["type", "content"]
        }
    })
}

pub fn build_prompt(raw_text: &str) -> String {
    format!(
        r#"You are an expert WeChat Official Account (公众号) editor.
Analyze the following raw text and structure it into a JSON array for rendering.

STRICT RULES FOR OUTPUT:
1. **Formatting Noise**: Do NOT overuse bold text (isEmphasis). 99% of paragraphs should have NO emphasis. Only bold a sentence if it is a crucial definition.
2. **Quotes**: Do NOT use "Golden Quotes" (isGoldenQuote) unless it is a literal quote from a famous person. Do not turn summary sentences into quotes.
3. **Logic & Lists**: If the text contains steps, lists, or arguments, PREFER converting them into 'list_item' blocks with explicit numbering (1., 2., 3.) in the content string. This improves logical clarity.
4. **Spacing**: Keep paragraphs moderate in length. If a paragraph is huge, split it.
5. **Images**: If you see "[IMG-x]", mark as 'image_placeholder'.
6. **Headings**: Identify H1 (Title), H2 (Heading), H3 (Subheading) correctly.

Raw Text:
{}
"#,
        raw_text
    )
}

pub fn build_request(raw_text: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        generation_config: Some(GenerationConfig {
            temperature: Some(STRUCTURE_TEMPERATURE),
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(response_schema()),
            image_config: None,
        }),
        ..GenerateContentRequest::user_prompt(build_prompt(raw_text))
    }
}

/// Parses the model's JSON answer. Blank text means "no blocks"; anything
/// that is not an array of blocks is a parse error.
pub fn parse_blocks(text: &str) -> Result<Vec<ArticleBlock>> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<ArticleBlock>>(body)
        .map_err(|e| Error::Parse(format!("structuring response is not a block array: {}", e)))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
