//! Logical input events fed to the editor

use crate::model::document::Direction;

/// A decoded user intent. Key decoding lives in `keybindings`; everything
/// downstream only sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    InsertChar(char),
    InsertNewline,
    Backspace,
    DeleteForward,

    Move(Direction),
    /// Move while extending the selection
    Select(Direction),
    MoveWordLeft,
    MoveWordRight,
    Home,
    End,
    PageUp,
    PageDown,
    ScrollUp,
    ScrollDown,

    Save,
    Find,
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
    Quit,
    Escape,
}
