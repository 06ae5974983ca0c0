// EditorTestHarness - Virtual terminal environment for end-to-end tests

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use scoom::app::{ActionOutcome, Editor};
use scoom::config::Config;
use scoom::input::keybindings::KeybindingResolver;
use scoom::model::document::Position;
use scoom::model::filesystem::StdFileSystem;
use scoom::services::clipboard::MemoryClipboard;
use scoom::services::clock::ManualClock;
use scoom::view;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

/// Virtual editor environment for testing
/// Captures all rendering output without displaying to actual terminal
pub struct EditorTestHarness {
    editor: Editor,
    terminal: Terminal<TestBackend>,
    keybindings: KeybindingResolver,
    clock: Rc<ManualClock>,
    temp_dir: TempDir,
}

impl EditorTestHarness {
    /// Create new test harness with virtual terminal
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        Self::with_config(width, height, Config::default())
    }

    pub fn with_config(width: u16, height: u16, config: Config) -> io::Result<Self> {
        let clock = Rc::new(ManualClock::new());
        let mut editor = Editor::new(
            config,
            Box::new(StdFileSystem),
            Box::new(MemoryClipboard::new()),
            Box::new(Rc::clone(&clock)),
        );
        editor.set_terminal_size(height as usize, width as usize);

        Ok(Self {
            editor,
            terminal: Terminal::new(TestBackend::new(width, height))?,
            keybindings: KeybindingResolver::new(),
            clock,
            temp_dir: TempDir::new()?,
        })
    }

    /// Path of `name` inside the harness's temporary directory
    pub fn temp_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write `content` to a temporary file and open it
    pub fn open_with_content(&mut self, name: &str, content: &str) -> io::Result<PathBuf> {
        let path = self.temp_path(name);
        std::fs::write(&path, content)?;
        self.open_file(&path)?;
        Ok(path)
    }

    pub fn open_file(&mut self, path: &Path) -> io::Result<()> {
        self.editor.open(path).map_err(io::Error::other)?;
        self.render()
    }

    /// Simulate a key press
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<ActionOutcome> {
        let outcome = self.press(code, modifiers)?;
        self.render()?;
        Ok(outcome)
    }

    /// Send the same key press multiple times, rendering once at the end
    pub fn send_key_repeat(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        count: usize,
    ) -> io::Result<()> {
        for _ in 0..count {
            self.press(code, modifiers)?;
        }
        self.render()
    }

    /// Simulate typing a string of text
    pub fn type_text(&mut self, text: &str) -> io::Result<()> {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch), KeyModifiers::NONE)?;
        }
        self.render()
    }

    fn press(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<ActionOutcome> {
        let Some(action) = self.keybindings.resolve(&KeyEvent::new(code, modifiers)) else {
            return Ok(ActionOutcome::Continue);
        };
        self.editor.handle_action(action).map_err(io::Error::other)
    }

    /// Let time pass, e.g. to end a typing burst
    pub fn advance_time(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Resize the virtual terminal the way a SIGWINCH would
    pub fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.terminal.backend_mut().resize(width, height);
        self.editor.notify_resize_pending();
        self.render()
    }

    /// Force a render cycle and capture output, mirroring the main loop
    pub fn render(&mut self) -> io::Result<()> {
        if self.editor.take_resize_pending() {
            self.terminal.autoresize()?;
            let size = self.terminal.size()?;
            self.editor
                .set_terminal_size(size.height as usize, size.width as usize);
        }
        self.editor.scroll();
        let editor = &self.editor;
        self.terminal.draw(|frame| view::render(frame, editor))?;
        Ok(())
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn cursor_position(&self) -> Position {
        self.editor.document().cursor_position()
    }

    /// Get the current terminal buffer (what would be displayed)
    pub fn buffer(&self) -> &ratatui::buffer::Buffer {
        self.terminal.backend().buffer()
    }

    /// Get the text content of a specific screen row
    pub fn get_row_text(&self, y: u16) -> String {
        let buffer = self.buffer();
        (0..buffer.area.width)
            .filter_map(|x| buffer.content.get(buffer.index_of(x, y)))
            .map(|cell| cell.symbol())
            .collect()
    }

    /// Get entire screen as string (for debugging)
    pub fn screen_to_string(&self) -> String {
        let height = self.buffer().area.height;
        (0..height)
            .map(|y| self.get_row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Verify text appears on screen
    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain '{text}'\nScreen content:\n{screen}"
        );
    }

    /// Verify text does not appear on screen
    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen to not contain '{text}'\nScreen content:\n{screen}"
        );
    }

    /// The document text as it would be saved
    pub fn get_buffer_content(&self) -> String {
        let bytes = self
            .editor
            .document()
            .rows_to_string()
            .unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn assert_buffer_content(&self, expected: &str) {
        assert_eq!(self.get_buffer_content(), expected);
    }
}
