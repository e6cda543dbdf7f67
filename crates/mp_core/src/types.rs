use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declares a closed set of string-valued settings with `Display`/`FromStr`
/// and serde support using the same literal spellings.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "unknown {} '{}', expected one of: {}",
                        stringify!($name),
                        other,
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

/// Kind of a content block. Unknown kinds are kept verbatim so that a newer
/// structuring model can emit them without breaking rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Title,
    Heading,
    Subheading,
    Paragraph,
    Quote,
    ListItem,
    ImagePlaceholder,
    Other(String),
}

impl BlockKind {
    /// Spellings of every recognized kind, in schema order.
    pub const KNOWN: [&'static str; 7] = [
        "title",
        "heading",
        "subheading",
        "paragraph",
        "quote",
        "list_item",
        "image_placeholder",
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Title => "title",
            BlockKind::Heading => "heading",
            BlockKind::Subheading => "subheading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Quote => "quote",
            BlockKind::ListItem => "list_item",
            BlockKind::ImagePlaceholder => "image_placeholder",
            BlockKind::Other(raw) => raw,
        }
    }
}

impl From<String> for BlockKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "title" => BlockKind::Title,
            "heading" => BlockKind::Heading,
            "subheading" => BlockKind::Subheading,
            "paragraph" => BlockKind::Paragraph,
            "quote" => BlockKind::Quote,
            "list_item" => BlockKind::ListItem,
            "image_placeholder" => BlockKind::ImagePlaceholder,
            _ => BlockKind::Other(raw),
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed unit of article content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_emphasis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_golden_quote: Option<bool>,
}

impl ArticleBlock {
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            is_emphasis: None,
            is_golden_quote: None,
        }
    }

    pub fn with_emphasis(mut self, emphasis: bool) -> Self {
        self.is_emphasis = Some(emphasis);
        self
    }

    pub fn emphasized(&self) -> bool {
        self.is_emphasis.unwrap_or(false)
    }

    pub fn golden_quote(&self) -> bool {
        self.is_golden_quote.unwrap_or(false)
    }
}

/// An image registered in the current session, addressed by its `IMG-<n>` id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<PathBuf>,
    pub preview_data: String,
}

impl ImageAsset {
    /// The literal tag (`[IMG-<n>]`) that references this asset from text.
    pub fn tag(&self) -> String {
        format!("[{}]", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub text: &'static str,
    pub background: &'static str,
    pub accent: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorTheme {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub colors: ThemeColors,
    pub font_family: &'static str,
    pub border_radius: &'static str,
}

/// A citation returned by a search-grounded generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSource {
    pub title: String,
    pub uri: String,
}

/// An article drafted by the writer, as kept in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<SearchSource>,
}

impl GeneratedArticle {
    pub fn new(title: impl Into<String>, content: impl Into<String>, sources: Vec<SearchSource>) -> Self {
        // Stored timestamps only carry milliseconds.
        let now = Utc::now();
        let timestamp = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            title: title.into(),
            content: content.into(),
            sources,
        }
    }
}

string_enum! {
    /// Crop policy applied uniformly to every rendered image.
    pub enum ImageRatio {
        Original => "original",
        Square => "1:1",
        FourThree => "4:3",
    }
}

impl Default for ImageRatio {
    fn default() -> Self {
        ImageRatio::Original
    }
}

string_enum! {
    pub enum ImageResolution {
        OneK => "1K",
        TwoK => "2K",
        FourK => "4K",
    }
}

impl Default for ImageResolution {
    fn default() -> Self {
        ImageResolution::OneK
    }
}

string_enum! {
    pub enum ImageGenAspectRatio {
        Square => "1:1",
        FourThree => "4:3",
        Widescreen => "16:9",
    }
}

impl Default for ImageGenAspectRatio {
    fn default() -> Self {
        ImageGenAspectRatio::FourThree
    }
}

string_enum! {
    /// `Flash` is the fast tier, `Pro` adds resolution control and may need
    /// an interactive credential selection first.
    pub enum ImageModelTier {
        Flash => "flash",
        Pro => "pro",
    }
}

impl Default for ImageModelTier {
    fn default() -> Self {
        ImageModelTier::Flash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind_keeps_unknown_spelling() {
        let block: ArticleBlock =
            serde_json::from_str(r#"{"type":"callout","content":"hi"}"#).unwrap();
        assert_eq!(block.kind, BlockKind::Other("callout".to_string()));

        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"type":"callout","content":"hi"}"#);
    }

    #[test]
    fn test_block_flags_are_camel_case() {
        let block: ArticleBlock = serde_json::from_str(
            r#"{"type":"list_item","content":"1. a","isEmphasis":true,"isGoldenQuote":null}"#,
        )
        .unwrap();
        assert_eq!(block.kind, BlockKind::ListItem);
        assert!(block.emphasized());
        assert!(!block.golden_quote());
    }

    #[test]
    fn test_setting_enums_parse_their_labels() {
        assert_eq!("1:1".parse::<ImageRatio>().unwrap(), ImageRatio::Square);
        assert_eq!("16:9".parse::<ImageGenAspectRatio>().unwrap(), ImageGenAspectRatio::Widescreen);
        assert_eq!("pro".parse::<ImageModelTier>().unwrap(), ImageModelTier::Pro);
        assert_eq!(ImageResolution::FourK.to_string(), "4K");
        assert!("3:2".parse::<ImageRatio>().is_err());
    }

    #[test]
    fn test_generated_article_timestamp_is_millis() {
        let article = GeneratedArticle::new("t", "c", vec![]);
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["timestamp"].as_i64().unwrap(), article.timestamp.timestamp_millis());
    }
}
