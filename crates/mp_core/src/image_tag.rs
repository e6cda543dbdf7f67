//! The `[IMG-<n>]` tag grammar that links text to the image table.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IMAGE_TAG: Regex = Regex::new(r"\[IMG-[0-9]+\]").expect("image tag regex should compile");
    static ref DIGITS: Regex = Regex::new(r"[0-9]+").expect("digits regex should compile");
}

/// A piece of block content: either literal text or an image tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Tag(&'a str),
}

/// Splits `content` around every image tag. Empty text runs are dropped.
pub fn split_tags(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in IMAGE_TAG.find_iter(content) {
        if m.start() > last {
            segments.push(Segment::Text(&content[last..m.start()]));
        }
        segments.push(Segment::Tag(m.as_str()));
        last = m.end();
    }
    if last < content.len() {
        segments.push(Segment::Text(&content[last..]));
    }
    segments
}

pub fn contains_tag(content: &str) -> bool {
    IMAGE_TAG.is_match(content)
}

/// Zero-based table index for a tag, taken from its first run of digits.
/// `None` when there are no digits, the number is 0, or it does not fit.
pub fn tag_index(tag: &str) -> Option<usize> {
    let digits = DIGITS.find(tag)?;
    let position: usize = digits.as_str().parse().ok()?;
    position.checked_sub(1)
}

pub fn image_id(position: usize) -> String {
    format!("IMG-{}", position)
}

pub fn format_tag(position: usize) -> String {
    format!("[{}]", image_id(position))
}
