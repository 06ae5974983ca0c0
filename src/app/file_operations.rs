//! Opening and saving the document

use super::prompt::{Prompt, PromptType};
use super::Editor;
use crate::error::{EditorError, EditorResult};
use std::path::{Path, PathBuf};

impl Editor {
    /// Load `path` (creating it when missing) and pick its language
    pub fn open(&mut self, path: &Path) -> EditorResult<()> {
        let lines = self.filesystem.read_lines(path)?;
        self.document.load_lines(lines)?;
        self.document.select_language_for(path);
        self.filename = Some(path.to_path_buf());
        self.history.clear();
        self.last_edit = None;
        tracing::info!(
            "opened {} ({} lines)",
            path.display(),
            self.document.row_count()
        );
        Ok(())
    }

    /// Save to the current file name, asking for one first if needed
    pub(super) fn save(&mut self) -> EditorResult<()> {
        if self.filename.is_none() {
            self.prompt = Some(Prompt::new(
                "Save as (ESC to cancel): ".to_string(),
                PromptType::SaveFileAs,
            ));
            return Ok(());
        }
        self.write_to_disk()
    }

    pub(super) fn save_as(&mut self, path: PathBuf) -> EditorResult<()> {
        self.filename = Some(path);
        self.write_to_disk()
    }

    fn write_to_disk(&mut self) -> EditorResult<()> {
        let path = self.filename.clone().ok_or(EditorError::NoFileName)?;
        let bytes = self.document.rows_to_string()?;
        let written = self.filesystem.write_bytes(&path, &bytes)?;
        self.document.select_language_for(&path);
        self.document.mark_clean();
        self.set_status_message(format!("{written} bytes written to disk"));
        Ok(())
    }
}
