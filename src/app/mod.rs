//! The editor: input processing on top of the document model
//!
//! `Editor` owns the document, the undo history and the I/O collaborators.
//! Every logical action goes through [`Editor::handle_action`], which decides
//! when to snapshot, applies the edit, and turns recoverable failures into
//! status messages. Only fatal errors are returned.

mod clipboard;
mod file_operations;
pub mod prompt;
mod prompt_actions;
mod undo_actions;

use crate::config::Config;
use crate::error::{EditorError, EditorResult};
use crate::input::actions::EditorAction;
use crate::model::document::{Direction, Document};
use crate::model::filesystem::FileSystem;
use crate::model::history::HistoryManager;
use crate::primitives::column::closing_bracket;
use crate::services::clipboard::Clipboard;
use crate::services::clock::Clock;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use self::prompt::Prompt;

/// Rows reserved below the text area (status bar and message bar)
pub const RESERVED_ROWS: usize = 2;

/// Result of handling one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Continue,
    Quit,
}

/// Shared "terminal was resized" flag. The event source sets it; the event
/// loop takes it before the next render.
#[derive(Debug, Clone, Default)]
pub struct ResizeFlag(Arc<AtomicBool>);

impl ResizeFlag {
    pub fn notify(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clear the flag, returning whether it was set
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    set_at: Instant,
}

pub struct Editor {
    document: Document,
    history: HistoryManager,
    config: Config,
    filename: Option<PathBuf>,
    filesystem: Box<dyn FileSystem>,
    clipboard: Box<dyn Clipboard>,
    clock: Box<dyn Clock>,
    /// Time of the last content edit, for the snapshot debounce
    last_edit: Option<Instant>,
    quit_times: u32,
    status_message: Option<StatusMessage>,
    prompt: Option<Prompt>,
    resize: ResizeFlag,
    /// Text area size (status and message bars excluded)
    screen_rows: usize,
    screen_cols: usize,
}

impl Editor {
    pub fn new(
        config: Config,
        filesystem: Box<dyn FileSystem>,
        clipboard: Box<dyn Clipboard>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let document = Document::new(config.editor.document_options());
        let history = HistoryManager::new(config.history.max_depth);
        let quit_times = config.editor.quit_confirmations;
        Self {
            document,
            history,
            config,
            filename: None,
            filesystem,
            clipboard,
            clock,
            last_edit: None,
            quit_times,
            status_message: None,
            prompt: None,
            resize: ResizeFlag::default(),
            screen_rows: 24 - RESERVED_ROWS,
            screen_cols: 80,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// `(rows, cols)` of the text area
    pub fn screen_size(&self) -> (usize, usize) {
        (self.screen_rows, self.screen_cols)
    }

    /// Set the size of the whole terminal
    pub fn set_terminal_size(&mut self, height: usize, width: usize) {
        self.screen_rows = height.saturating_sub(RESERVED_ROWS).max(1);
        self.screen_cols = width.max(1);
    }

    /// Handle that other threads can use to report a resize
    pub fn resize_handle(&self) -> ResizeFlag {
        self.resize.clone()
    }

    pub fn notify_resize_pending(&self) {
        self.resize.notify();
    }

    pub fn take_resize_pending(&self) -> bool {
        self.resize.take()
    }

    /// Set a status message to display in the message bar
    pub fn set_status_message(&mut self, message: String) {
        tracing::debug!("status: {}", message);
        self.status_message = Some(StatusMessage {
            text: message,
            set_at: self.clock.now(),
        });
    }

    /// The status message, if it has not yet expired
    pub fn get_status_message(&self) -> Option<&str> {
        let message = self.status_message.as_ref()?;
        let age = self.clock.now().saturating_duration_since(message.set_at);
        (age < self.config.editor.status_message_timeout()).then_some(message.text.as_str())
    }

    /// Bring the viewport to the cursor; call before rendering
    pub fn scroll(&mut self) {
        self.document
            .scroll_to_cursor(self.screen_rows, self.screen_cols);
    }

    /// Apply one action. Recoverable failures become status messages; only a
    /// fatal error is returned.
    pub fn handle_action(&mut self, action: EditorAction) -> EditorResult<ActionOutcome> {
        let result = if self.prompt.is_some() {
            self.handle_prompt_action(action).map(|()| ActionOutcome::Continue)
        } else {
            self.dispatch(action)
        };

        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_fatal() => {
                tracing::error!("fatal error: {}", e);
                Err(e)
            }
            Err(e) => {
                self.report_error(&e);
                Ok(ActionOutcome::Continue)
            }
        }
    }

    fn report_error(&mut self, error: &EditorError) {
        let message = match error {
            EditorError::EmptyHistory => "Nothing to undo or redo".to_string(),
            EditorError::EmptyDocument => "Document is empty".to_string(),
            EditorError::Io { .. } => format!("Can't save! {error}"),
            other => other.to_string(),
        };
        tracing::warn!("{}", error);
        self.set_status_message(message);
    }

    fn dispatch(&mut self, action: EditorAction) -> EditorResult<ActionOutcome> {
        if action != EditorAction::Quit {
            self.quit_times = self.config.editor.quit_confirmations;
        }
        if !matches!(action, EditorAction::Select(_) | EditorAction::Copy) {
            self.document.clear_selection();
        }

        match action {
            EditorAction::InsertChar(c) => self.insert_char(c)?,
            EditorAction::InsertNewline => {
                self.edit_with_snapshot(true, Document::insert_newline_at_cursor)?;
            }
            EditorAction::Backspace => {
                self.edit_with_snapshot(false, Document::delete_char_at_cursor)?;
            }
            EditorAction::DeleteForward => {
                self.edit_with_snapshot(false, |doc| {
                    doc.move_cursor(Direction::Right)?;
                    doc.delete_char_at_cursor()
                })
                .or_else(ignore_at_end)?;
            }
            EditorAction::Move(direction) => ignore_edge(self.document.move_cursor(direction)),
            EditorAction::Select(direction) => ignore_edge(self.document.select_move(direction)),
            EditorAction::MoveWordLeft => ignore_edge(self.document.move_word(false)),
            EditorAction::MoveWordRight => ignore_edge(self.document.move_word(true)),
            EditorAction::Home => self.document.move_home(),
            EditorAction::End => self.document.move_end(),
            EditorAction::PageUp => ignore_edge(self.document.move_page(true, self.screen_rows)),
            EditorAction::PageDown => ignore_edge(self.document.move_page(false, self.screen_rows)),
            EditorAction::ScrollUp => self.document.scroll_lines(-1, self.screen_rows),
            EditorAction::ScrollDown => self.document.scroll_lines(1, self.screen_rows),
            EditorAction::Save => self.save()?,
            EditorAction::Find => self.start_search(),
            EditorAction::Copy => self.copy()?,
            EditorAction::Cut => self.cut()?,
            EditorAction::Paste => self.paste()?,
            EditorAction::Undo => self.undo()?,
            EditorAction::Redo => self.redo()?,
            EditorAction::Escape => {}
            EditorAction::Quit => return Ok(self.request_quit()),
        }
        Ok(ActionOutcome::Continue)
    }

    fn insert_char(&mut self, c: char) -> EditorResult<()> {
        let closer = if self.config.editor.auto_close_brackets {
            u8::try_from(c).ok().and_then(closing_bracket)
        } else {
            None
        };
        self.edit_with_snapshot(false, |doc| {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                doc.insert_char_at_cursor(byte)?;
            }
            if let Some(closer) = closer {
                doc.insert_char_at_cursor(closer)?;
                doc.move_cursor(Direction::Left)?;
            }
            Ok(())
        })
    }

    fn request_quit(&mut self) -> ActionOutcome {
        if self.document.is_dirty() && self.quit_times > 0 {
            self.set_status_message(format!(
                "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                self.quit_times
            ));
            self.quit_times -= 1;
            return ActionOutcome::Continue;
        }
        tracing::info!("quit requested");
        ActionOutcome::Quit
    }
}

/// Movement past a document edge is not worth a message
fn ignore_edge(result: EditorResult<()>) {
    if let Err(e) = result {
        tracing::trace!("movement ignored: {}", e);
    }
}

/// Delete forward at the end of the document does nothing
fn ignore_at_end(error: EditorError) -> EditorResult<()> {
    match error {
        EditorError::OutOfBounds { .. } | EditorError::EmptyDocument => {
            tracing::trace!("delete forward ignored: {}", error);
            Ok(())
        }
        other => Err(other),
    }
}
