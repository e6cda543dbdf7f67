//! Article drafting: style policy, request building and post-processing.

use std::collections::HashSet;

use mp_core::{GeneratedArticle, SearchSource, WriteRequest};

use crate::wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Tool};

pub const WRITER_MODEL: &str = "gemini-2.5-flash";
pub const FALLBACK_TITLE: &str = "New Article";
const WRITER_TEMPERATURE: f32 = 0.5;
const SHORT_LINE_LIMIT: usize = 100;

pub const SYSTEM_INSTRUCTION: &str = r#"You are a professional, senior writer for a WeChat Official Account.
Your writing style is calm, logical, and insightful.

CRITICAL ANTI-AI INSTRUCTIONS:
1. **NO CLICHES**: Never use "In conclusion" (综上所述), "It is worth noting" (值得注意的是), "In today's era" (在当今时代).
2. **LOGIC**: Use NUMBERED LISTS (1., 2., 3.) for all key arguments. This is mandatory.
3. **SPACING**: Do not output huge walls of text. Break sections clearly.
4. **TONE**: Be direct. Don't be overly enthusiastic. Be helpful and objective.
"#;

pub fn build_prompt(request: &WriteRequest) -> String {
    let search_line = if request.use_search {
        "Tool: Use Google Search for facts."
    } else {
        ""
    };
    format!(
        r#"Topic: {}
Context: {}

Task: Write a high-quality article.
{}

Structure Requirement:
- Title: Catchy but professional.
- Intro: Brief, hook the reader.
- Body: 3-4 Main Sections. Each section MUST use numbered lists (1, 2, 3) to explain details.
- Conclusion: Short, punchy summary.

Make it ready for a mobile reading experience.
"#,
        request.topic, request.context, search_line
    )
}

pub fn build_request(request: &WriteRequest) -> GenerateContentRequest {
    let tools = if request.use_search {
        vec![Tool::google_search()]
    } else {
        Vec::new()
    };
    GenerateContentRequest {
        system_instruction: Some(Content::system(SYSTEM_INSTRUCTION)),
        generation_config: Some(GenerationConfig {
            temperature: Some(WRITER_TEMPERATURE),
            ..Default::default()
        }),
        tools,
        ..GenerateContentRequest::user_prompt(build_prompt(request))
    }
}

/// Best-effort title extraction, returning `(title, body)`.
///
/// A leading `# ` heading becomes the title and leaves the body. Otherwise a
/// short first line is reused as the title with the body untouched.
pub fn extract_title(text: &str) -> (String, String) {
    let lines: Vec<&str> = text.split('\n').collect();
    let Some(first) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return (FALLBACK_TITLE.to_string(), text.to_string());
    };

    let line = lines[first].trim();
    if let Some(heading) = line.strip_prefix("# ") {
        let body = lines[first + 1..].join("\n").trim().to_string();
        return (heading.trim().to_string(), body);
    }
    if line.chars().count() < SHORT_LINE_LIMIT {
        return (line.to_string(), text.to_string());
    }
    (FALLBACK_TITLE.to_string(), text.to_string())
}

/// Web citations in order of first appearance, one per URI.
pub fn collect_sources(response: &GenerateContentResponse) -> Vec<SearchSource> {
    let mut seen = HashSet::new();
    response
        .grounding_chunks()
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.clone().filter(|uri| !uri.is_empty())?;
            let title = web
                .title
                .clone()
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| "Source".to_string());
            Some(SearchSource { title, uri })
        })
        .filter(|source| seen.insert(source.uri.clone()))
        .collect()
}

/// Turns raw model output into a history-ready article.
pub fn finish_article(text: &str, sources: Vec<SearchSource>) -> GeneratedArticle {
    let (title, content) = extract_title(text);
    GeneratedArticle::new(title, content, sources)
}
