use mp_core::image_tag::{split_tags, Segment};
use mp_core::{ArticleBlock, BlockKind, ImageTable};

use crate::renderer::split_list_marker;

/// Plain-text equivalent of the rendered preview, used alongside the HTML
/// when exporting. Resolved images are dropped, unresolved tags stay literal.
pub fn plain_text(blocks: &[ArticleBlock], images: &ImageTable) -> String {
    let mut paragraphs: Vec<String> = blocks
        .iter()
        .filter_map(|block| block_text(block, images))
        .filter(|text| !text.trim().is_empty())
        .collect();
    paragraphs.push("END".to_string());
    paragraphs.join("\n\n")
}

fn block_text(block: &ArticleBlock, images: &ImageTable) -> Option<String> {
    match &block.kind {
        BlockKind::ImagePlaceholder => match images.resolve_tag(&block.content) {
            Some(_) => None,
            None => Some(block.content.clone()),
        },
        BlockKind::ListItem => Some(match split_list_marker(&block.content) {
            Some((marker, body)) => format!("{} {}", marker, inline_text(body, images)),
            None => format!("• {}", inline_text(&block.content, images)),
        }),
        BlockKind::Paragraph | BlockKind::Quote => Some(inline_text(&block.content, images)),
        _ => Some(block.content.clone()),
    }
}

fn inline_text(content: &str, images: &ImageTable) -> String {
    split_tags(content)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Text(text) => Some(text),
            Segment::Tag(tag) if images.resolve_tag(tag).is_none() => Some(tag),
            Segment::Tag(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_mirrors_blocks() {
        let mut images = ImageTable::new();
        images.append("data:a", None);
        let blocks = vec![
            ArticleBlock::new(BlockKind::Title, "Hello"),
            ArticleBlock::new(BlockKind::Paragraph, "World [IMG-1][IMG-4]"),
            ArticleBlock::new(BlockKind::ListItem, "2. Second point"),
            ArticleBlock::new(BlockKind::ListItem, "loose"),
            ArticleBlock::new(BlockKind::ImagePlaceholder, "[IMG-1]"),
            ArticleBlock::new(BlockKind::ImagePlaceholder, "[IMG-2]"),
        ];

        assert_eq!(
            plain_text(&blocks, &images),
            "Hello\n\nWorld [IMG-4]\n\n2. Second point\n\n• loose\n\n[IMG-2]\n\nEND"
        );
    }
}
