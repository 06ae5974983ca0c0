//! The in-memory document: rows, cursor, viewport and selection
//!
//! # Coordinates
//!
//! - `cy` is a row index. It is a valid row or equal to `rows.len()` (the
//!   transient "past the last row" position).
//! - `cx` is a raw byte column *including* the line-number gutter when line
//!   numbers are enabled, so on a valid row
//!   `gutter(cy) <= cx <= gutter(cy) + row.len()`.
//! - `rx` is the rendered column (tabs expanded), also gutter-inclusive.
//!
//! Every mutation re-annotates the touched rows and walks forward while the
//! block-comment carry state of the following row is stale.

use crate::error::{EditorError, EditorResult};
use crate::model::row::TextRow;
use crate::primitives::column::{
    closing_bracket, compute_indent_delta, cx_to_rx, gutter_width, is_compound_statement,
    is_opening_bracket, open_bracket_span_end, rx_to_cx, word_end_forward, word_start_backward,
    DEFAULT_TAB_WIDTH,
};
use crate::primitives::highlighter::HighlightClass;
use crate::primitives::language::{detect_language, LanguageProfile};
use std::path::Path;

/// Indent characters used when no language is selected
const DEFAULT_INDENT_START: u8 = b'{';
const DEFAULT_INDENT_END: Option<u8> = Some(b'}');

/// Direction of a single cursor step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A content position: byte offset into a row (gutter excluded) and row index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub offset: usize,
}

/// Document behaviour fixed at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentOptions {
    pub tab_width: usize,
    /// Whether the line-number gutter is part of the cursor coordinate space
    pub line_numbers: bool,
    pub auto_indent: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            line_numbers: true,
            auto_indent: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<TextRow>,
    cx: usize,
    cy: usize,
    rx: usize,
    row_offset: usize,
    col_offset: usize,
    language: Option<&'static LanguageProfile>,
    dirty: bool,
    options: DocumentOptions,
    /// Fixed end of a shift-selection; the cursor is the moving end
    anchor: Option<Position>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentOptions::default())
    }
}

impl Document {
    pub fn new(options: DocumentOptions) -> Self {
        let mut doc = Self {
            rows: Vec::new(),
            cx: 0,
            cy: 0,
            rx: 0,
            row_offset: 0,
            col_offset: 0,
            language: None,
            dirty: false,
            options,
            anchor: None,
        };
        doc.cx = doc.gutter(0);
        doc
    }

    /// Build a clean document from lines (no terminators)
    pub fn from_lines<I, L>(options: DocumentOptions, lines: I) -> EditorResult<Self>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut doc = Self::new(options);
        doc.load_lines(lines)?;
        Ok(doc)
    }

    // ----- accessors -----

    pub fn rows(&self) -> &[TextRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&TextRow> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(cx, cy)`
    pub fn cursor(&self) -> (usize, usize) {
        (self.cx, self.cy)
    }

    /// Cursor as a content position (gutter removed)
    pub fn cursor_position(&self) -> Position {
        Position {
            row: self.cy,
            offset: self.content_offset(),
        }
    }

    /// Rendered, gutter-inclusive cursor column as of the last
    /// [`Document::scroll_to_cursor`]
    pub fn rx(&self) -> usize {
        self.rx
    }

    /// `(row_offset, col_offset)`
    pub fn viewport(&self) -> (usize, usize) {
        (self.row_offset, self.col_offset)
    }

    pub fn set_viewport(&mut self, row_offset: usize, col_offset: usize) {
        self.row_offset = row_offset;
        self.col_offset = col_offset;
    }

    pub fn language(&self) -> Option<&'static LanguageProfile> {
        self.language
    }

    pub fn options(&self) -> DocumentOptions {
        self.options
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Width of the line-number gutter for `row`, or 0 with line numbers off
    pub fn gutter(&self, row: usize) -> usize {
        if self.options.line_numbers {
            gutter_width(row)
        } else {
            0
        }
    }

    fn content_offset(&self) -> usize {
        let len = self.rows.get(self.cy).map_or(0, TextRow::len);
        self.cx.saturating_sub(self.gutter(self.cy)).min(len)
    }

    /// Place the cursor, clamping it into the document
    pub fn set_cursor(&mut self, cx: usize, cy: usize) {
        self.cy = cy.min(self.rows.len());
        let gutter = self.gutter(self.cy);
        let len = self.rows.get(self.cy).map_or(0, TextRow::len);
        self.cx = cx.clamp(gutter, gutter + len);
    }

    /// Place the cursor at a content position, clamping it into the document
    pub fn set_cursor_position(&mut self, position: Position) {
        let cx = self.gutter(position.row.min(self.rows.len())) + position.offset;
        self.set_cursor(cx, position.row);
    }

    // ----- language and highlighting -----

    /// Select the language matching `path` and re-annotate every row
    pub fn select_language_for(&mut self, path: &Path) {
        self.set_language(detect_language(path));
    }

    pub fn set_language(&mut self, language: Option<&'static LanguageProfile>) {
        self.language = language;
        tracing::debug!(
            "language set to {}",
            language.map_or("none", |profile| profile.name)
        );
        self.annotate_all();
    }

    fn annotate_all(&mut self) {
        let mut open = false;
        for row in &mut self.rows {
            row.annotate(self.language, open);
            open = row.comment_carries_over();
        }
    }

    /// Annotate `start`, then keep going while the next row was highlighted
    /// with a different carry-in than the one it now receives.
    fn annotate_from(&mut self, start: usize) {
        self.annotate_span(start, start);
    }

    /// Annotate every row in `start..=last`, then continue past `last` while
    /// the carry-in of the next row is stale.
    fn annotate_span(&mut self, start: usize, last: usize) {
        let mut i = start;
        while i < self.rows.len() {
            let open = i > 0 && self.rows[i - 1].comment_carries_over();
            if i > last && self.rows[i].is_annotated_with(open) {
                break;
            }
            self.rows[i].annotate(self.language, open);
            i += 1;
        }
        if i > start + 1 {
            tracing::trace!("re-annotated rows {}..{}", start, i);
        }
    }

    /// Paint a rendered range of `row` as a search match. Returns the
    /// previous highlight so the caller can put it back.
    pub fn set_match_highlight(
        &mut self,
        row: usize,
        start: usize,
        len: usize,
    ) -> Option<Vec<HighlightClass>> {
        let target = self.rows.get_mut(row)?;
        let saved = target.highlight().to_vec();
        target.mark(start, len, HighlightClass::Match);
        Some(saved)
    }

    pub fn restore_row_highlight(&mut self, row: usize, highlight: Vec<HighlightClass>) {
        if let Some(target) = self.rows.get_mut(row) {
            target.restore_highlight(highlight);
        }
    }

    // ----- row lifecycle -----

    fn renumber_from(&mut self, start: usize) {
        for (i, row) in self.rows.iter_mut().enumerate().skip(start) {
            row.set_index(i);
        }
    }

    /// Insert a row holding `content` at `at` (`0..=row_count`)
    pub fn insert_row(&mut self, at: usize, content: &[u8]) -> EditorResult<()> {
        if at > self.rows.len() {
            return Err(EditorError::out_of_bounds(at, self.rows.len()));
        }
        self.rows.try_reserve(1)?;
        let row = TextRow::new(at, content, self.options.tab_width)?;
        self.rows.insert(at, row);
        self.renumber_from(at + 1);
        self.annotate_from(at);
        self.dirty = true;
        Ok(())
    }

    /// Remove the row at `at` (`0..row_count`)
    pub fn delete_row(&mut self, at: usize) -> EditorResult<()> {
        if at >= self.rows.len() {
            return Err(EditorError::out_of_bounds(at, self.rows.len()));
        }
        self.rows.remove(at);
        self.renumber_from(at);
        self.annotate_from(at);
        self.dirty = true;
        Ok(())
    }

    /// Insert `byte` at the cursor and advance it
    pub fn insert_char_at_cursor(&mut self, byte: u8) -> EditorResult<()> {
        if self.cy >= self.rows.len() {
            self.cy = self.rows.len();
            self.insert_row(self.cy, b"")?;
            self.cx = self.gutter(self.cy);
        }
        let offset = self.content_offset();
        self.rows[self.cy].insert_char(offset, byte)?;
        self.annotate_from(self.cy);
        self.cx = self.gutter(self.cy) + offset + 1;
        self.dirty = true;
        Ok(())
    }

    /// Delete the byte before the cursor, joining with the previous row at
    /// the start of a row. Deleting an opener directly followed by its closer
    /// removes both.
    pub fn delete_char_at_cursor(&mut self) -> EditorResult<()> {
        if self.rows.is_empty() {
            return Err(EditorError::EmptyDocument);
        }
        if self.cy >= self.rows.len() {
            return Err(EditorError::out_of_bounds(self.cy, self.rows.len()));
        }
        let offset = self.content_offset();
        if offset == 0 && self.cy == 0 {
            return Err(EditorError::out_of_bounds(0, 0));
        }

        if offset > 0 {
            let row = &mut self.rows[self.cy];
            let removed = row.delete_char(offset - 1)?;
            if is_opening_bracket(removed) && row.raw().get(offset - 1).copied() == closing_bracket(removed) {
                row.delete_char(offset - 1)?;
            }
            self.annotate_from(self.cy);
            self.cx = self.gutter(self.cy) + offset - 1;
        } else {
            let moved = self.rows[self.cy].raw().to_vec();
            let prev = self.cy - 1;
            let join_at = self.rows[prev].len();
            self.rows[prev].append(&moved)?;
            self.delete_row(self.cy)?;
            self.annotate_from(prev);
            self.cy = prev;
            self.cx = self.gutter(prev) + join_at;
            tracing::debug!("joined row {} onto row {}", prev + 1, prev);
        }
        self.dirty = true;
        Ok(())
    }

    fn indent_chars(&self) -> (u8, Option<u8>) {
        self.language.map_or((DEFAULT_INDENT_START, DEFAULT_INDENT_END), |profile| {
            (profile.indent_start, profile.indent_end)
        })
    }

    /// Split the current row at the cursor, auto-indenting the new row
    pub fn insert_newline_at_cursor(&mut self) -> EditorResult<()> {
        if self.rows.is_empty() {
            self.insert_row(0, b"")?;
            self.cy = 0;
            self.cx = self.gutter(0);
            return Ok(());
        }

        let offset = if self.cy < self.rows.len() {
            self.content_offset()
        } else {
            0
        };
        if offset == 0 {
            self.insert_row(self.cy, b"")?;
            self.cy += 1;
            self.cx = self.gutter(self.cy);
            return Ok(());
        }

        let row = &self.rows[self.cy];
        let indent = if self.options.auto_indent {
            row.indentation()
        } else {
            0
        };
        let compound_closer = if self.options.auto_indent && is_compound_statement(row.raw()) {
            open_bracket_span_end(row.raw(), offset)
        } else {
            None
        };

        // Text between the cursor and the closer stays on the head row
        let split_at = compound_closer.unwrap_or(offset);
        let tail = self.rows[self.cy].split_off(split_at)?;
        self.annotate_from(self.cy);

        let new_indent = match compound_closer {
            Some(_) => {
                self.insert_row(self.cy + 1, &indented(indent + 1, b"")?)?;
                self.insert_row(self.cy + 2, &indented(indent, &tail)?)?;
                indent + 1
            }
            None => {
                let new_indent = if self.options.auto_indent {
                    let (start, end) = self.indent_chars();
                    let prefix = self.rows[self.cy].raw();
                    indent.saturating_add_signed(compute_indent_delta(prefix, start, end))
                } else {
                    0
                };
                self.insert_row(self.cy + 1, &indented(new_indent, &tail)?)?;
                new_indent
            }
        };

        self.cy += 1;
        self.cx = self.gutter(self.cy) + new_indent;
        tracing::debug!("split row {} at {} (indent {})", self.cy - 1, offset, new_indent);
        Ok(())
    }

    /// Insert text at the cursor; `\n` starts a new row
    pub fn insert_text_at_cursor(&mut self, text: &[u8]) -> EditorResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.cy >= self.rows.len() {
            self.cy = self.rows.len();
            self.insert_row(self.cy, b"")?;
        }
        let offset = self.content_offset();
        let tail = self.rows[self.cy].split_off(offset)?;

        let mut segments = text.split(|&b| b == b'\n').map(strip_cr);
        let first = segments.next().unwrap_or_default();
        self.rows[self.cy].append(first)?;

        let mut row = self.cy;
        let mut end_offset = offset + first.len();
        for segment in segments {
            row += 1;
            self.insert_row(row, segment)?;
            end_offset = segment.len();
        }
        self.rows[row].append(&tail)?;
        self.annotate_span(self.cy, row);

        self.cy = row;
        self.cx = self.gutter(row) + end_offset;
        self.dirty = true;
        Ok(())
    }

    /// Remove the current row and return its bytes. The last remaining row is
    /// cleared instead of removed.
    pub fn cut_current_row(&mut self) -> EditorResult<Vec<u8>> {
        if self.rows.is_empty() {
            return Err(EditorError::EmptyDocument);
        }
        let cy = self.cy.min(self.rows.len() - 1);
        let offset = self.content_offset();
        let text = self.rows[cy].raw().to_vec();

        if self.rows.len() == 1 {
            self.rows[0].split_off(0)?;
            self.annotate_from(0);
            self.dirty = true;
            self.set_cursor(0, 0);
        } else {
            self.delete_row(cy)?;
            let cy = cy.saturating_sub(1);
            self.set_cursor_position(Position { row: cy, offset });
        }
        Ok(text)
    }

    // ----- serialization -----

    /// All rows, each followed by `\n`
    pub fn rows_to_string(&self) -> EditorResult<Vec<u8>> {
        let total = self.rows.iter().map(|row| row.len() + 1).sum();
        let mut out = Vec::new();
        out.try_reserve_exact(total)?;
        for row in &self.rows {
            out.extend_from_slice(row.raw());
            out.push(b'\n');
        }
        Ok(out)
    }

    /// Replace every row with the `\n`-separated segments of `buffer`. A
    /// single trailing `\n` terminates the last row rather than starting a
    /// new one.
    pub fn string_to_rows(&mut self, buffer: &[u8]) -> EditorResult<()> {
        if buffer.is_empty() {
            return self.load_lines(std::iter::empty::<&[u8]>());
        }
        let body = buffer.strip_suffix(b"\n").unwrap_or(buffer);
        self.load_lines(body.split(|&b| b == b'\n'))
    }

    /// Replace every row with `lines` and reset cursor and viewport. The
    /// document is left clean.
    pub fn load_lines<I, L>(&mut self, lines: I) -> EditorResult<()>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut rows = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            rows.try_reserve(1)?;
            rows.push(TextRow::new(index, line.as_ref(), self.options.tab_width)?);
        }
        self.rows = rows;
        self.annotate_all();
        self.cy = 0;
        self.cx = self.gutter(0);
        self.rx = self.cx;
        self.row_offset = 0;
        self.col_offset = 0;
        self.anchor = None;
        self.dirty = false;
        Ok(())
    }

    // ----- cursor movement -----

    /// Pull a past-the-end cursor back onto the last row
    fn settle_cursor(&mut self) -> EditorResult<()> {
        if self.rows.is_empty() {
            return Err(EditorError::EmptyDocument);
        }
        if self.cy >= self.rows.len() {
            self.cy = self.rows.len() - 1;
        }
        let offset = self.content_offset();
        self.cx = self.gutter(self.cy) + offset;
        Ok(())
    }

    /// Move one step. Vertical moves keep the content column, clamped to the
    /// target row; horizontal moves wrap across row boundaries.
    pub fn move_cursor(&mut self, direction: Direction) -> EditorResult<()> {
        self.settle_cursor()?;
        let offset = self.content_offset();
        let len = self.rows[self.cy].len();
        let last = self.rows.len() - 1;

        let target = match direction {
            Direction::Left if offset > 0 => Position { row: self.cy, offset: offset - 1 },
            Direction::Left if self.cy > 0 => Position {
                row: self.cy - 1,
                offset: self.rows[self.cy - 1].len(),
            },
            Direction::Right if offset < len => Position { row: self.cy, offset: offset + 1 },
            Direction::Right if self.cy < last => Position { row: self.cy + 1, offset: 0 },
            Direction::Up if self.cy > 0 => Position { row: self.cy - 1, offset },
            Direction::Down if self.cy < last => Position { row: self.cy + 1, offset },
            _ => return Err(EditorError::out_of_bounds(self.cy, self.rows.len())),
        };
        self.set_cursor_position(target);
        Ok(())
    }

    /// Jump over the next (or previous) identifier, stopping at row edges
    pub fn move_word(&mut self, forward: bool) -> EditorResult<()> {
        self.settle_cursor()?;
        let offset = self.content_offset();
        let raw = self.rows[self.cy].raw();

        let target = if forward {
            if offset < raw.len() {
                Position { row: self.cy, offset: word_end_forward(raw, offset) }
            } else if self.cy + 1 < self.rows.len() {
                Position { row: self.cy + 1, offset: 0 }
            } else {
                return Err(EditorError::out_of_bounds(offset, raw.len()));
            }
        } else if offset > 0 {
            Position { row: self.cy, offset: word_start_backward(raw, offset) }
        } else if self.cy > 0 {
            Position {
                row: self.cy - 1,
                offset: self.rows[self.cy - 1].len(),
            }
        } else {
            return Err(EditorError::out_of_bounds(0, 0));
        };
        self.set_cursor_position(target);
        Ok(())
    }

    pub fn move_home(&mut self) {
        self.cx = self.gutter(self.cy);
    }

    pub fn move_end(&mut self) {
        let len = self.rows.get(self.cy).map_or(0, TextRow::len);
        self.cx = self.gutter(self.cy) + len;
    }

    /// Move a screenful up or down, keeping the content column
    pub fn move_page(&mut self, up: bool, screen_rows: usize) -> EditorResult<()> {
        self.settle_cursor()?;
        let offset = self.content_offset();
        let row = if up {
            self.cy.saturating_sub(screen_rows)
        } else {
            (self.cy + screen_rows).min(self.rows.len() - 1)
        };
        self.set_cursor_position(Position { row, offset });
        Ok(())
    }

    /// Scroll the viewport by `delta` rows, dragging the cursor along when it
    /// would leave the screen
    pub fn scroll_lines(&mut self, delta: isize, screen_rows: usize) {
        let max_offset = self.rows.len().saturating_sub(1);
        self.row_offset = self.row_offset.saturating_add_signed(delta).min(max_offset);
        if self.rows.is_empty() {
            return;
        }
        let offset = self.content_offset();
        let visible_end = self.row_offset + screen_rows.max(1) - 1;
        let row = self.cy.clamp(self.row_offset, visible_end.min(max_offset));
        if row != self.cy {
            self.set_cursor_position(Position { row, offset });
        }
    }

    /// Recompute `rx` and move the viewport so the cursor is visible
    pub fn scroll_to_cursor(&mut self, screen_rows: usize, screen_cols: usize) {
        let gutter = self.gutter(self.cy);
        let content_rx = self
            .rows
            .get(self.cy)
            .map_or(0, |row| cx_to_rx(row.raw(), self.content_offset(), self.options.tab_width));
        self.rx = gutter + content_rx;

        let screen_rows = screen_rows.max(1);
        if self.cy < self.row_offset {
            self.row_offset = self.cy;
        }
        if self.cy >= self.row_offset + screen_rows {
            self.row_offset = self.cy + 1 - screen_rows;
        }

        let text_cols = screen_cols.saturating_sub(gutter).max(1);
        if content_rx < self.col_offset {
            self.col_offset = content_rx;
        }
        if content_rx >= self.col_offset + text_cols {
            self.col_offset = content_rx + 1 - text_cols;
        }
    }

    /// Put the cursor on a rendered column of `row`
    pub fn set_cursor_render(&mut self, row: usize, render_col: usize) {
        let offset = self
            .rows
            .get(row)
            .map_or(0, |r| rx_to_cx(r.raw(), render_col, self.options.tab_width));
        self.set_cursor_position(Position { row, offset });
    }

    // ----- selection -----

    /// Extend the selection by one cursor step
    pub fn select_move(&mut self, direction: Direction) -> EditorResult<()> {
        let anchor = self.anchor.unwrap_or_else(|| self.cursor_position());
        self.move_cursor(direction)?;
        self.anchor = Some(anchor);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Ordered `(start, end)` of a non-empty selection
    pub fn selection(&self) -> Option<(Position, Position)> {
        let anchor = self.anchor?;
        let cursor = self.cursor_position();
        match anchor.cmp(&cursor) {
            std::cmp::Ordering::Less => Some((anchor, cursor)),
            std::cmp::Ordering::Greater => Some((cursor, anchor)),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Selected bytes with `\n` between rows
    pub fn selected_text(&self) -> Option<Vec<u8>> {
        let (start, end) = self.selection()?;
        let mut out = Vec::new();
        for row in start.row..=end.row.min(self.rows.len().saturating_sub(1)) {
            let raw = self.rows[row].raw();
            let from = if row == start.row { start.offset.min(raw.len()) } else { 0 };
            let to = if row == end.row { end.offset.min(raw.len()) } else { raw.len() };
            out.extend_from_slice(&raw[from..to.max(from)]);
            if row != end.row {
                out.push(b'\n');
            }
        }
        Some(out)
    }

    /// Rendered column range `[start, end)` of the selection on `row`
    pub fn selection_render_span(&self, row: usize) -> Option<(usize, usize)> {
        let (start, end) = self.selection()?;
        if row < start.row || row > end.row {
            return None;
        }
        let text = self.rows.get(row)?;
        let tab = self.options.tab_width;
        let from = if row == start.row { cx_to_rx(text.raw(), start.offset, tab) } else { 0 };
        let to = if row == end.row {
            cx_to_rx(text.raw(), end.offset, tab)
        } else {
            text.render().len()
        };
        Some((from, to))
    }
}

fn strip_cr(segment: &[u8]) -> &[u8] {
    segment.strip_suffix(b"\r").unwrap_or(segment)
}

fn indented(tabs: usize, text: &[u8]) -> EditorResult<Vec<u8>> {
    let mut out = Vec::new();
    out.try_reserve_exact(tabs + text.len())?;
    out.resize(tabs, b'\t');
    out.extend_from_slice(text);
    Ok(out)
}
