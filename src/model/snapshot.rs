use crate::error::EditorResult;
use crate::model::document::Document;

/// Self-contained copy of a document's text and cursor, the unit of
/// undo/redo history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Every row followed by `\n`
    text: Vec<u8>,
    row_count: usize,
    /// `(cx, cy)` at capture time
    cursor: (usize, usize),
}

impl Snapshot {
    pub fn capture(document: &Document) -> EditorResult<Self> {
        Ok(Self {
            text: document.rows_to_string()?,
            row_count: document.row_count(),
            cursor: document.cursor(),
        })
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Replace the document's rows and cursor with this snapshot's. The
    /// document is left dirty: its contents no longer match what was loaded
    /// or saved.
    pub fn restore_into(self, document: &mut Document) -> EditorResult<()> {
        let viewport = document.viewport();
        document.string_to_rows(&self.text)?;
        if document.row_count() != self.row_count {
            tracing::warn!(
                "snapshot row count mismatch: recorded {}, restored {}",
                self.row_count,
                document.row_count()
            );
        }
        let (cx, cy) = self.cursor;
        document.set_cursor(cx, cy);
        document.set_viewport(viewport.0, viewport.1);
        document.mark_dirty();
        Ok(())
    }
}
