//! Copy, cut and paste

use super::Editor;
use crate::error::EditorResult;

impl Editor {
    /// Copy the selection, or the current row when nothing is selected
    pub(super) fn copy(&mut self) -> EditorResult<()> {
        let text = match self.document.selected_text() {
            Some(text) => text,
            None => {
                let (_, cy) = self.document.cursor();
                match self.document.row(cy) {
                    Some(row) => row.raw().to_vec(),
                    None => return Ok(()),
                }
            }
        };
        self.clipboard.copy(&text)?;
        self.set_status_message(format!("Copied {} bytes", text.len()));
        Ok(())
    }

    /// Move the current row to the clipboard
    pub(super) fn cut(&mut self) -> EditorResult<()> {
        if self.document.is_empty() {
            return Ok(());
        }
        // Copy first so a clipboard failure leaves the row in place
        let (_, cy) = self.document.cursor();
        let row = cy.min(self.document.row_count() - 1);
        let text = self
            .document
            .row(row)
            .map(|row| row.raw().to_vec())
            .unwrap_or_default();
        self.clipboard.copy(&text)?;
        self.edit_with_snapshot(true, |doc| doc.cut_current_row().map(|_| ()))
    }

    pub(super) fn paste(&mut self) -> EditorResult<()> {
        let text = self.clipboard.paste()?;
        if text.is_empty() {
            return Ok(());
        }
        self.edit_with_snapshot(true, |doc| doc.insert_text_at_cursor(&text))
    }
}
