use std::ops::Range;
use std::path::{Path, PathBuf};

use mp_core::{
    load_image_file, themes, ArticleBlock, BlockKind, Document, EditorTheme, ImageAsset, ImageRatio,
    ImageRequest, InferenceModel,
};
use mp_render::{plain_text, render, Markup};

use crate::busy::BusyGuard;
use crate::clipboard::{Clipboard, ClipboardPayload};
use crate::notice::Notice;

pub const INITIAL_CONTENT: &str = "在这里输入你的文章内容...

你可以直接粘贴大段文字。
如果需要插入图片，请将光标移动到想插入的位置，点击上方的“插入图片”按钮。
点击右侧的“AI 一键排版”开始美化。";

const PREVIEW_TITLE: &str = "Preview";

fn clamp_to_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

#[derive(Debug, Default, Clone, Copy)]
struct Busy {
    formatting: bool,
    generating_image: bool,
}

/// The editor half of the app: raw text with a selection, the structured
/// document it was formatted into, and the look settings.
#[derive(Debug)]
pub struct EditorSession {
    text: String,
    selection: Range<usize>,
    document: Document,
    theme: &'static EditorTheme,
    ratio: ImageRatio,
    busy: Busy,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        let mut session = Self {
            text: String::new(),
            selection: 0..0,
            document: Document::new(),
            theme: themes::default_theme(),
            ratio: ImageRatio::default(),
            busy: Busy::default(),
        };
        session.set_text(INITIAL_CONTENT);
        session
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the raw text and puts the cursor at its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let end = self.text.len();
        self.selection = end..end;
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Byte offsets, clamped into the text and onto char boundaries.
    pub fn select(&mut self, start: usize, end: usize) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let start = clamp_to_boundary(&self.text, start);
        let end = clamp_to_boundary(&self.text, end);
        self.selection = start..end;
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.select(pos, pos);
    }

    /// Replaces the selection with `insertion` and moves the cursor past it.
    pub fn insert_at_cursor(&mut self, insertion: &str) {
        let Range { start, end } = self.selection.clone();
        self.text.replace_range(start..end, insertion);
        let cursor = start + insertion.len();
        self.selection = cursor..cursor;
    }

    pub fn selected_text(&self) -> Option<&str> {
        let text = &self.text[self.selection.clone()];
        (!text.is_empty()).then_some(text)
    }

    /// Inserts the tag the next attached image will get.
    pub fn insert_image_placeholder(&mut self) -> String {
        let tag = self.document.images.next_tag();
        self.insert_at_cursor(&tag);
        tag
    }

    pub fn attach_image(&mut self, preview_data: impl Into<String>, source_file: Option<PathBuf>) -> &ImageAsset {
        self.document.images.append(preview_data, source_file)
    }

    pub async fn attach_image_file(&mut self, path: &Path) -> mp_core::Result<&ImageAsset> {
        let data = load_image_file(path).await?;
        Ok(self.attach_image(data, Some(path.to_path_buf())))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn blocks(&self) -> &[ArticleBlock] {
        self.document.blocks()
    }

    pub fn theme(&self) -> &'static EditorTheme {
        self.theme
    }

    pub fn select_theme(&mut self, id: &str) -> Result<(), Notice> {
        self.theme = themes::by_id(id).ok_or_else(|| Notice::UnknownTheme(id.to_string()))?;
        Ok(())
    }

    pub fn ratio(&self) -> ImageRatio {
        self.ratio
    }

    pub fn set_ratio(&mut self, ratio: ImageRatio) {
        self.ratio = ratio;
    }

    pub fn is_formatting(&self) -> bool {
        self.busy.formatting
    }

    pub fn is_generating_image(&self) -> bool {
        self.busy.generating_image
    }

    /// Restructures the raw text. The previous blocks stay in place unless the
    /// model returns a full new sequence.
    pub async fn format(&mut self, model: &dyn InferenceModel) -> Result<usize, Notice> {
        if !model.has_credential() {
            return Err(Notice::MissingCredential);
        }
        if self.busy.formatting {
            return Err(Notice::Busy("formatting"));
        }

        let result = {
            let _busy = BusyGuard::raise(&mut self.busy.formatting);
            model.structure_text(&self.text).await
        };

        match result {
            Ok(blocks) => {
                let count = blocks.len();
                tracing::info!("Formatted text into {} blocks with {}", count, model.name());
                self.document.replace_blocks(blocks);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Formatting failed: {}", e);
                Err(Notice::FormatFailed)
            }
        }
    }

    /// Generates an image, registers it, and inserts its tag at the cursor.
    /// Returns the inserted tag; an empty prompt does nothing.
    pub async fn generate_image(
        &mut self,
        model: &dyn InferenceModel,
        request: &ImageRequest,
    ) -> Result<Option<String>, Notice> {
        if request.prompt.trim().is_empty() {
            return Ok(None);
        }
        if !model.has_credential() {
            return Err(Notice::MissingCredential);
        }
        if self.busy.generating_image {
            return Err(Notice::Busy("image generation"));
        }

        let result = {
            let _busy = BusyGuard::raise(&mut self.busy.generating_image);
            model.generate_image(request).await
        };

        match result {
            Ok(Some(data)) => {
                let tag = self.attach_image(data, None).tag();
                self.insert_at_cursor(&tag);
                Ok(Some(tag))
            }
            Ok(None) => Err(Notice::ImageEmpty),
            Err(e) => {
                tracing::error!("Image generation failed: {}", e);
                Err(Notice::ImageFailed)
            }
        }
    }

    pub fn reset(&mut self) {
        self.set_text(INITIAL_CONTENT);
        self.document.clear();
    }

    pub fn preview(&self) -> Markup {
        render(self.document.blocks(), self.theme, &self.document.images, self.ratio)
    }

    pub fn export(&self) -> ClipboardPayload {
        let title = self
            .document
            .blocks()
            .iter()
            .find(|block| block.kind == BlockKind::Title)
            .map(|block| block.content.clone())
            .unwrap_or_else(|| PREVIEW_TITLE.to_string());
        ClipboardPayload {
            title,
            html: self.preview().into_string(),
            text: plain_text(self.document.blocks(), &self.document.images),
        }
    }

    pub async fn copy_to(&self, clipboard: &dyn Clipboard) -> Result<ClipboardPayload, Notice> {
        let payload = self.export();
        match clipboard.write(&payload).await {
            Ok(()) => Ok(payload),
            Err(e) => {
                tracing::error!("Failed to copy: {}", e);
                Err(Notice::CopyFailed)
            }
        }
    }
}
