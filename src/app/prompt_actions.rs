//! Prompt input handling: "Save as" and incremental search

use super::prompt::{find_bytes, Prompt, PromptType};
use super::Editor;
use crate::error::EditorResult;
use crate::input::actions::EditorAction;
use crate::model::document::Direction;
use std::path::PathBuf;

impl Editor {
    pub(super) fn start_search(&mut self) {
        let prompt = Prompt::search(
            "Search (Use ESC/Arrows/Enter): ".to_string(),
            self.document.cursor(),
            self.document.viewport(),
        );
        self.prompt = Some(prompt);
    }

    pub(super) fn handle_prompt_action(&mut self, action: EditorAction) -> EditorResult<()> {
        let Some(prompt) = self.prompt.as_mut() else {
            return Ok(());
        };
        let prompt_type = prompt.prompt_type;

        match action {
            EditorAction::InsertChar(c) if !c.is_control() => {
                prompt.input.push(c);
                self.on_search_input_changed(prompt_type);
            }
            EditorAction::Backspace | EditorAction::DeleteForward => {
                prompt.input.pop();
                self.on_search_input_changed(prompt_type);
            }
            EditorAction::Escape => self.cancel_prompt(),
            EditorAction::InsertNewline => return self.confirm_prompt(),
            EditorAction::Move(direction) if prompt_type == PromptType::Search => {
                let forward = matches!(direction, Direction::Right | Direction::Down);
                if let Some(search) = prompt.search.as_mut() {
                    search.forward = forward;
                }
                self.search_step();
            }
            _ => {}
        }
        Ok(())
    }

    fn on_search_input_changed(&mut self, prompt_type: PromptType) {
        if prompt_type != PromptType::Search {
            return;
        }
        if let Some(search) = self.prompt.as_mut().and_then(|p| p.search.as_mut()) {
            search.last_match = None;
            search.forward = true;
        }
        self.search_step();
    }

    fn cancel_prompt(&mut self) {
        self.restore_search_highlight();
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        match prompt.prompt_type {
            PromptType::SaveFileAs => self.set_status_message("Save aborted".to_string()),
            PromptType::Search => {
                if let Some(search) = prompt.search {
                    let (cx, cy) = search.saved_cursor;
                    self.document.set_cursor(cx, cy);
                    let (row_offset, col_offset) = search.saved_viewport;
                    self.document.set_viewport(row_offset, col_offset);
                }
            }
        }
    }

    fn confirm_prompt(&mut self) -> EditorResult<()> {
        self.restore_search_highlight();
        let Some(prompt) = self.prompt.take() else {
            return Ok(());
        };
        match prompt.prompt_type {
            PromptType::SaveFileAs => {
                if prompt.input.is_empty() {
                    self.set_status_message("Save aborted".to_string());
                    return Ok(());
                }
                self.save_as(PathBuf::from(prompt.input))
            }
            PromptType::Search => Ok(()),
        }
    }

    fn restore_search_highlight(&mut self) {
        let saved = self
            .prompt
            .as_mut()
            .and_then(|p| p.search.as_mut())
            .and_then(|search| search.saved_highlight.take());
        if let Some((row, highlight)) = saved {
            self.document.restore_row_highlight(row, highlight);
        }
    }

    /// Find the next match in the current direction, wrapping around the
    /// document, and paint it.
    fn search_step(&mut self) {
        self.restore_search_highlight();
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        let query = prompt.input.as_bytes().to_vec();
        let Some(search) = prompt.search.as_mut() else {
            return;
        };
        let rows = self.document.row_count();
        if query.is_empty() || rows == 0 {
            return;
        }

        if search.last_match.is_none() {
            search.forward = true;
        }
        let mut current = search.last_match;
        for _ in 0..rows {
            let next = match (current, search.forward) {
                (None, _) => 0,
                (Some(row), true) => (row + 1) % rows,
                (Some(0), false) => rows - 1,
                (Some(row), false) => row - 1,
            };
            current = Some(next);

            let Some(col) = self
                .document
                .row(next)
                .and_then(|row| find_bytes(row.render(), &query))
            else {
                continue;
            };

            search.last_match = Some(next);
            self.document.set_cursor_render(next, col);
            self.document.set_viewport(next, 0);
            search.saved_highlight = self
                .document
                .set_match_highlight(next, col, query.len())
                .map(|saved| (next, saved));
            return;
        }
    }
}
