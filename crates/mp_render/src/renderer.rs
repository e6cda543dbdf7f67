//! Maps a block sequence to WeChat-style HTML.
//!
//! Rendering is pure and infallible: unknown block kinds fall back to plain
//! paragraphs and unresolved image tags become visible placeholders.

use lazy_static::lazy_static;
use maud::{html, Markup, DOCTYPE};
use regex::Regex;

use mp_core::image_tag::{split_tags, Segment};
use mp_core::{ArticleBlock, BlockKind, EditorTheme, ImageRatio, ImageTable};

use crate::styles::{self, Styles};

lazy_static! {
    static ref LIST_MARKER: Regex =
        Regex::new(r"^([0-9]+\.)\s+").expect("list marker regex should compile");
}

struct Context<'a> {
    styles: Styles,
    images: &'a ImageTable,
}

/// Splits a leading `"<digits>. "` marker off a list item.
pub fn split_list_marker(content: &str) -> Option<(&str, &str)> {
    let caps = LIST_MARKER.captures(content)?;
    let marker = caps.get(1)?.as_str();
    let rest = &content[caps.get(0)?.end()..];
    Some((marker, rest))
}

/// Renders the preview body for `blocks`.
pub fn render(
    blocks: &[ArticleBlock],
    theme: &EditorTheme,
    images: &ImageTable,
    ratio: ImageRatio,
) -> Markup {
    let ctx = Context {
        styles: Styles::new(theme, ratio),
        images,
    };

    html! {
        div style=(ctx.styles.container) {
            @for block in blocks {
                (render_block(block, &ctx))
            }
            div style=(styles::FOOTER) {
                span style=(styles::FOOTER_RULE) {}
                "END"
                span style=(styles::FOOTER_RULE) {}
            }
        }
    }
}

/// Wraps a rendered preview in a standalone HTML page.
pub fn render_page(title: &str, body: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body style="margin:0 auto;max-width:680px;" {
                (body)
            }
        }
    }
}

fn render_block(block: &ArticleBlock, ctx: &Context<'_>) -> Markup {
    let s = &ctx.styles;
    match &block.kind {
        BlockKind::Title => html! { h1 style=(s.title) { (block.content) } },
        BlockKind::Heading => html! { h2 style=(s.heading) { (block.content) } },
        BlockKind::Subheading => html! { h3 style=(s.subheading) { (block.content) } },
        BlockKind::Paragraph => html! {
            p style=(s.paragraph) { (render_inline(&block.content, block.emphasized(), ctx)) }
        },
        BlockKind::Quote => html! {
            div style=(s.quote) { (render_inline(&block.content, false, ctx)) }
        },
        BlockKind::ListItem => render_list_item(&block.content, ctx),
        BlockKind::ImagePlaceholder => match ctx.images.resolve_tag(&block.content) {
            Some(src) => html! {
                div style=(styles::IMAGE_CONTAINER) {
                    img src=(src) alt="Article Asset" style=(s.image);
                }
            },
            None => html! { div style=(styles::PLACEHOLDER_BOX) { (block.content) } },
        },
        BlockKind::Other(kind) => {
            tracing::debug!("Rendering unrecognized block kind '{}' as paragraph", kind);
            html! { p style=(s.paragraph) { (block.content) } }
        }
    }
}

fn render_list_item(content: &str, ctx: &Context<'_>) -> Markup {
    let s = &ctx.styles;
    html! {
        div style=(s.list_item) {
            @if let Some((marker, body)) = split_list_marker(content) {
                span style=(s.list_marker) { (marker) }
                div style=(styles::LIST_BODY) { (render_inline(body, false, ctx)) }
            } @else {
                span style=(s.list_bullet) { "•" }
                div style=(styles::LIST_BODY) { (render_inline(content, false, ctx)) }
            }
        }
    }
}

/// Text runs with `[IMG-n]` tags swapped for images or muted placeholders.
fn render_inline(content: &str, emphasis: bool, ctx: &Context<'_>) -> Markup {
    let s = &ctx.styles;
    html! {
        @for segment in split_tags(content) {
            @match segment {
                Segment::Tag(tag) => {
                    @if let Some(src) = ctx.images.resolve_tag(tag) {
                        img src=(src) alt="Asset" style=(s.inline_image);
                    } @else {
                        span style=(styles::MUTED_TAG) { (tag) }
                    }
                },
                Segment::Text(text) => {
                    @if emphasis {
                        span style=(s.emphasis) { (text) }
                    } @else {
                        span { (text) }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::themes;

    fn table(n: usize) -> ImageTable {
        let mut images = ImageTable::new();
        for i in 1..=n {
            images.append(format!("data:image/png;base64,IMG{}", i), None);
        }
        images
    }

    fn render_default(blocks: &[ArticleBlock], images: &ImageTable) -> String {
        render(blocks, themes::default_theme(), images, ImageRatio::Original).into_string()
    }

    #[test]
    fn test_render_is_deterministic() {
        let blocks = vec![
            ArticleBlock::new(BlockKind::Title, "Hello"),
            ArticleBlock::new(BlockKind::Quote, "q [IMG-1] [IMG-9]"),
            ArticleBlock::new(BlockKind::ListItem, "1. one"),
        ];
        let images = table(1);
        assert_eq!(render_default(&blocks, &images), render_default(&blocks, &images));
    }

    #[test]
    fn test_title_then_paragraph_with_image() {
        let blocks = vec![
            ArticleBlock::new(BlockKind::Title, "Hello"),
            ArticleBlock::new(BlockKind::Paragraph, "World [IMG-1]").with_emphasis(false),
        ];
        let html = render_default(&blocks, &table(1));

        let title = html.find("<h1").unwrap();
        let para = html.find("<p").unwrap();
        let text = html.find("<span>World </span>").unwrap();
        let img = html.find("data:image/png;base64,IMG1").unwrap();
        assert!(title < para && para < text && text < img);
        assert!(!html.contains("font-weight:bold;color:#000000;\">World"));
    }

    #[test]
    fn test_missing_inline_image_shows_muted_tag() {
        let blocks = vec![ArticleBlock::new(BlockKind::Paragraph, "see [IMG-5]")];
        let html = render_default(&blocks, &table(2));
        assert!(html.contains(&format!("<span style=\"{}\">[IMG-5]</span>", styles::MUTED_TAG)));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_numbered_list_item_splits_marker() {
        let blocks = vec![ArticleBlock::new(BlockKind::ListItem, "2. Second point")];
        let html = render_default(&blocks, &ImageTable::new());
        assert!(html.contains(">2.</span>"));
        assert!(html.contains("<span>Second point</span>"));
        assert!(!html.contains("•"));
    }

    #[test]
    fn test_plain_list_item_gets_bullet() {
        let blocks = vec![ArticleBlock::new(BlockKind::ListItem, "apples")];
        let html = render_default(&blocks, &ImageTable::new());
        assert!(html.contains(">•</span>"));
        assert!(html.contains("<span>apples</span>"));
    }

    #[test]
    fn test_emphasis_bolds_every_text_run() {
        let theme = themes::by_id("tech").unwrap();
        let blocks = vec![
            ArticleBlock::new(BlockKind::Paragraph, "a [IMG-1] b").with_emphasis(true),
        ];
        let html = render(&blocks, theme, &table(1), ImageRatio::Original).into_string();
        let bold = "<span style=\"font-weight:bold;color:#1565C0;\">";
        assert!(html.contains(&format!("{}a </span>", bold)));
        assert!(html.contains(&format!("{} b</span>", bold)));
    }

    #[test]
    fn test_image_placeholder_block() {
        let blocks = vec![
            ArticleBlock::new(BlockKind::ImagePlaceholder, "[IMG-1]"),
            ArticleBlock::new(BlockKind::ImagePlaceholder, "[IMG-3]"),
        ];
        let html = render_default(&blocks, &table(1));
        assert!(html.contains("alt=\"Article Asset\""));
        assert!(html.contains(&format!("<div style=\"{}\">[IMG-3]</div>", styles::PLACEHOLDER_BOX)));
    }

    #[test]
    fn test_ratio_crops_rendered_images() {
        let blocks = vec![ArticleBlock::new(BlockKind::ImagePlaceholder, "[IMG-1]")];
        let html = render(&blocks, themes::default_theme(), &table(1), ImageRatio::FourThree)
            .into_string();
        assert!(html.contains("aspect-ratio:4 / 3;object-fit:cover;"));
    }

    #[test]
    fn test_unknown_kind_renders_as_paragraph() {
        let block: ArticleBlock =
            serde_json::from_str(r#"{"type":"callout","content":"Heads up [IMG-1]"}"#).unwrap();
        let html = render_default(&[block], &table(1));
        assert!(html.contains(">Heads up [IMG-1]</p>"));
    }

    #[test]
    fn test_content_is_escaped() {
        let blocks = vec![ArticleBlock::new(BlockKind::Heading, "<b>x</b> & y")];
        let html = render_default(&blocks, &ImageTable::new());
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt; &amp; y"));
    }

    #[test]
    fn test_title_blocks_render_in_place() {
        let blocks = vec![
            ArticleBlock::new(BlockKind::Paragraph, "intro"),
            ArticleBlock::new(BlockKind::Title, "First"),
            ArticleBlock::new(BlockKind::Title, "Second"),
        ];
        let html = render_default(&blocks, &ImageTable::new());
        assert_eq!(html.matches("<h1").count(), 2);
        let intro = html.find("<span>intro</span>").unwrap();
        let first = html.find(">First</h1>").unwrap();
        let second = html.find(">Second</h1>").unwrap();
        assert!(intro < first && first < second);
    }

    #[test]
    fn test_footer_is_always_present() {
        let html = render_default(&[], &ImageTable::new());
        assert!(html.contains("END"));
    }

    #[test]
    fn test_split_list_marker() {
        assert_eq!(split_list_marker("10. ten"), Some(("10.", "ten")));
        assert_eq!(split_list_marker("10.ten"), None);
        assert_eq!(split_list_marker("- dash"), None);
    }
}
