//! Snapshot policy and undo/redo actions

use super::Editor;
use crate::error::EditorResult;
use crate::model::document::Document;
use crate::model::snapshot::Snapshot;

impl Editor {
    /// Apply `edit` to the document with an undo snapshot of the state
    /// before it. Structural edits (`always`) always record one; typing only
    /// does once the debounce interval has passed since the previous edit.
    /// A failed edit records nothing and leaves the redo stack alone.
    pub(super) fn edit_with_snapshot<F>(&mut self, always: bool, edit: F) -> EditorResult<()>
    where
        F: FnOnce(&mut Document) -> EditorResult<()>,
    {
        let now = self.clock.now();
        let debounce = self.config.history.snapshot_debounce();
        let due = always
            || self
                .last_edit
                .map_or(true, |last| now.saturating_duration_since(last) > debounce);
        let snapshot = if due {
            Some(Snapshot::capture(&self.document)?)
        } else {
            None
        };

        edit(&mut self.document)?;

        if let Some(snapshot) = snapshot {
            self.history.push_undo(snapshot)?;
        }
        self.last_edit = Some(now);
        Ok(())
    }

    pub(super) fn undo(&mut self) -> EditorResult<()> {
        self.history.undo(&mut self.document)?;
        self.last_edit = None;
        Ok(())
    }

    pub(super) fn redo(&mut self) -> EditorResult<()> {
        self.history.redo(&mut self.document)?;
        self.last_edit = None;
        Ok(())
    }
}
