//! A single line of the document and its derived buffers

use crate::error::{EditorError, EditorResult};
use crate::primitives::column::{expand_tabs, leading_tabs};
use crate::primitives::highlighter::{annotate_row, HighlightClass};
use crate::primitives::language::LanguageProfile;

/// One row of text.
///
/// `raw` holds the literal bytes (no trailing newline). `render` is `raw` with
/// tabs expanded and `highlight` has one class per rendered byte. Every
/// mutation rebuilds `render` and resizes `highlight` so the two always have
/// the same length; the owning document re-annotates after each mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRow {
    index: usize,
    raw: Vec<u8>,
    render: Vec<u8>,
    highlight: Vec<HighlightClass>,
    indentation: usize,
    comment_carries_over: bool,
    /// Carry-in used by the last annotation; `None` after `raw` changed
    annotated_with: Option<bool>,
    tab_width: usize,
}

impl TextRow {
    pub fn new(index: usize, content: &[u8], tab_width: usize) -> EditorResult<Self> {
        let mut raw = Vec::new();
        raw.try_reserve_exact(content.len())?;
        raw.extend_from_slice(content);

        let mut row = Self {
            index,
            raw,
            render: Vec::new(),
            highlight: Vec::new(),
            indentation: 0,
            comment_carries_over: false,
            annotated_with: None,
            tab_width,
        };
        row.update_render();
        Ok(row)
    }

    /// Position of this row in its document
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    pub fn highlight(&self) -> &[HighlightClass] {
        &self.highlight
    }

    /// Number of leading tab bytes
    pub fn indentation(&self) -> usize {
        self.indentation
    }

    /// Whether a block comment is still open at the end of this row
    pub fn comment_carries_over(&self) -> bool {
        self.comment_carries_over
    }

    /// Length of `raw` in bytes
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Insert one byte at `at` (`0..=len`)
    pub fn insert_char(&mut self, at: usize, byte: u8) -> EditorResult<()> {
        if at > self.raw.len() {
            return Err(EditorError::out_of_bounds(at, self.raw.len()));
        }
        self.raw.try_reserve(1)?;
        self.raw.insert(at, byte);
        self.update_render();
        Ok(())
    }

    /// Remove the byte at `at` (`0..len`)
    pub fn delete_char(&mut self, at: usize) -> EditorResult<u8> {
        if at >= self.raw.len() {
            return Err(EditorError::out_of_bounds(at, self.raw.len()));
        }
        let removed = self.raw.remove(at);
        self.update_render();
        Ok(removed)
    }

    /// Concatenate `bytes` onto the end of the row
    pub fn append(&mut self, bytes: &[u8]) -> EditorResult<()> {
        self.raw.try_reserve(bytes.len())?;
        self.raw.extend_from_slice(bytes);
        self.update_render();
        Ok(())
    }

    /// Cut the row at `at`, returning the bytes after it
    pub fn split_off(&mut self, at: usize) -> EditorResult<Vec<u8>> {
        if at > self.raw.len() {
            return Err(EditorError::out_of_bounds(at, self.raw.len()));
        }
        let tail = self.raw.split_off(at);
        self.update_render();
        Ok(tail)
    }

    /// Rebuild `render` and `indentation` from `raw`, then annotate the row
    /// with `language`. Returns whether `comment_carries_over` changed.
    pub fn refresh(&mut self, language: Option<&LanguageProfile>, comment_open_at_start: bool) -> bool {
        self.update_render();
        self.annotate(language, comment_open_at_start)
    }

    /// Re-run the highlighter without touching `render`.
    /// Returns whether `comment_carries_over` changed.
    pub(crate) fn annotate(&mut self, language: Option<&LanguageProfile>, comment_open_at_start: bool) -> bool {
        let carried = annotate_row(&self.render, &mut self.highlight, language, comment_open_at_start);
        let changed = carried != self.comment_carries_over;
        self.comment_carries_over = carried;
        self.annotated_with = Some(comment_open_at_start);
        changed
    }

    /// Whether the highlight is current for the given carry-in state
    pub(crate) fn is_annotated_with(&self, comment_open_at_start: bool) -> bool {
        self.annotated_with == Some(comment_open_at_start)
    }

    /// Overwrite the highlight classes of a rendered range (search matches)
    pub(crate) fn mark(&mut self, start: usize, len: usize, class: HighlightClass) {
        let end = (start + len).min(self.highlight.len());
        if start < end {
            self.highlight[start..end].fill(class);
        }
    }

    pub(crate) fn restore_highlight(&mut self, highlight: Vec<HighlightClass>) {
        if highlight.len() == self.render.len() {
            self.highlight = highlight;
        }
    }

    fn update_render(&mut self) {
        self.render = expand_tabs(&self.raw, self.tab_width);
        self.indentation = leading_tabs(&self.raw);
        self.annotated_with = None;
        self.highlight.clear();
        self.highlight.resize(self.render.len(), HighlightClass::Normal);
    }
}
