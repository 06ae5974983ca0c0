use crate::input::actions::EditorAction;
use crate::model::document::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

/// Resolves key events to actions
#[derive(Debug, Clone)]
pub struct KeybindingResolver {
    bindings: HashMap<(KeyCode, KeyModifiers), EditorAction>,
}

impl Default for KeybindingResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingResolver {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        let ctrl = KeyModifiers::CONTROL;
        let none = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;

        for (key, action) in [
            ('s', EditorAction::Save),
            ('q', EditorAction::Quit),
            ('f', EditorAction::Find),
            ('c', EditorAction::Copy),
            ('x', EditorAction::Cut),
            ('v', EditorAction::Paste),
            ('z', EditorAction::Undo),
            ('y', EditorAction::Redo),
            ('h', EditorAction::Backspace),
        ] {
            bindings.insert((KeyCode::Char(key), ctrl), action);
        }

        for (code, direction) in [
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
        ] {
            bindings.insert((code, none), EditorAction::Move(direction));
            bindings.insert((code, shift), EditorAction::Select(direction));
        }
        bindings.insert((KeyCode::Left, ctrl), EditorAction::MoveWordLeft);
        bindings.insert((KeyCode::Right, ctrl), EditorAction::MoveWordRight);
        bindings.insert((KeyCode::Up, ctrl), EditorAction::ScrollUp);
        bindings.insert((KeyCode::Down, ctrl), EditorAction::ScrollDown);

        bindings.insert((KeyCode::Home, none), EditorAction::Home);
        bindings.insert((KeyCode::End, none), EditorAction::End);
        bindings.insert((KeyCode::PageUp, none), EditorAction::PageUp);
        bindings.insert((KeyCode::PageDown, none), EditorAction::PageDown);
        bindings.insert((KeyCode::Enter, none), EditorAction::InsertNewline);
        bindings.insert((KeyCode::Tab, none), EditorAction::InsertChar('\t'));
        bindings.insert((KeyCode::Backspace, none), EditorAction::Backspace);
        bindings.insert((KeyCode::Delete, none), EditorAction::DeleteForward);
        bindings.insert((KeyCode::Esc, none), EditorAction::Escape);

        Self { bindings }
    }

    /// Map a key press to an action. Plain (or shifted) characters insert
    /// themselves; releases and unbound keys resolve to nothing.
    pub fn resolve(&self, event: &KeyEvent) -> Option<EditorAction> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        tracing::trace!(
            "resolve: code={:?}, modifiers={:?}",
            event.code,
            event.modifiers
        );

        if let Some(action) = self.bindings.get(&(event.code, event.modifiers)) {
            return Some(*action);
        }
        match event.code {
            KeyCode::Char(c)
                if event.modifiers.is_empty() || event.modifiers == KeyModifiers::SHIFT =>
            {
                Some(EditorAction::InsertChar(c))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_default_bindings() {
        let resolver = KeybindingResolver::new();
        assert_eq!(
            resolver.resolve(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(EditorAction::Save)
        );
        assert_eq!(
            resolver.resolve(&key(KeyCode::Left, KeyModifiers::SHIFT)),
            Some(EditorAction::Select(Direction::Left))
        );
        assert_eq!(
            resolver.resolve(&key(KeyCode::Right, KeyModifiers::CONTROL)),
            Some(EditorAction::MoveWordRight)
        );
        assert_eq!(
            resolver.resolve(&key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(EditorAction::InsertChar('\t'))
        );
    }

    #[test]
    fn test_characters_insert_themselves() {
        let resolver = KeybindingResolver::new();
        assert_eq!(
            resolver.resolve(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(EditorAction::InsertChar('A'))
        );
        assert_eq!(
            resolver.resolve(&key(KeyCode::Char('k'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let resolver = KeybindingResolver::new();
        let mut event = key(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(resolver.resolve(&event), None);
    }
}
