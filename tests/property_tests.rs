// Property-based tests using proptest
// These tests generate random sequences of operations and verify invariants

mod common;

use common::harness::EditorTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use proptest::prelude::*;

/// Generate random edit operations
#[derive(Debug, Clone)]
enum EditOp {
    TypeChar(char),
    TypeString(String),
    Backspace,
    Delete,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Cut,
    Paste,
}

impl EditOp {
    /// Apply this operation to the test harness
    fn apply(&self, harness: &mut EditorTestHarness) -> std::io::Result<()> {
        let key = |code| (code, KeyModifiers::NONE);
        let (code, modifiers) = match self {
            Self::TypeChar(ch) => return harness.type_text(&ch.to_string()),
            Self::TypeString(s) => return harness.type_text(s),
            Self::Backspace => key(KeyCode::Backspace),
            Self::Delete => key(KeyCode::Delete),
            Self::Enter => key(KeyCode::Enter),
            Self::Left => key(KeyCode::Left),
            Self::Right => key(KeyCode::Right),
            Self::Up => key(KeyCode::Up),
            Self::Down => key(KeyCode::Down),
            Self::Home => key(KeyCode::Home),
            Self::End => key(KeyCode::End),
            Self::Cut => (KeyCode::Char('x'), KeyModifiers::CONTROL),
            Self::Paste => (KeyCode::Char('v'), KeyModifiers::CONTROL),
        };
        harness.send_key(code, modifiers).map(|_| ())
    }
}

/// Strategy for generating random edit operations
fn edit_op_strategy() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        // Typing operations (more common)
        3 => any::<char>()
            .prop_filter("printable ASCII", |c| c.is_ascii() && !c.is_ascii_control())
            .prop_map(EditOp::TypeChar),
        2 => "[a-zA-Z0-9 ]{1,10}".prop_map(EditOp::TypeString),
        // Navigation operations
        1 => Just(EditOp::Left),
        1 => Just(EditOp::Right),
        1 => Just(EditOp::Up),
        1 => Just(EditOp::Down),
        1 => Just(EditOp::Home),
        1 => Just(EditOp::End),
        // Editing operations
        2 => Just(EditOp::Backspace),
        2 => Just(EditOp::Delete),
        2 => Just(EditOp::Enter),
        1 => Just(EditOp::Cut),
        1 => Just(EditOp::Paste),
    ]
}

fn assert_cursor_in_document(harness: &EditorTestHarness) {
    let doc = harness.editor().document();
    let position = doc.cursor_position();
    assert!(position.row <= doc.row_count());
    let len = doc.row(position.row).map_or(0, |row| row.len());
    assert!(position.offset <= len);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any sequence of keys keeps the cursor inside the document and renders
    #[test]
    fn prop_cursor_stays_in_document(ops in prop::collection::vec(edit_op_strategy(), 1..40)) {
        let mut harness = EditorTestHarness::new(60, 12).unwrap();
        for op in &ops {
            op.apply(&mut harness).unwrap();
            assert_cursor_in_document(&harness);
        }
    }

    /// Undoing everything returns to the empty document
    #[test]
    fn prop_undo_everything_restores_empty(ops in prop::collection::vec(edit_op_strategy(), 1..30)) {
        let mut harness = EditorTestHarness::new(60, 12).unwrap();
        for op in &ops {
            op.apply(&mut harness).unwrap();
        }
        while harness.editor().history().can_undo() {
            harness.send_key(KeyCode::Char('z'), KeyModifiers::CONTROL).unwrap();
        }
        prop_assert_eq!(harness.get_buffer_content(), "");
    }

    /// Saved files read back to the same rows
    #[test]
    fn prop_save_and_reopen_roundtrip(lines in prop::collection::vec("[ -~\t]{0,30}", 1..10)) {
        let content: String = lines.iter().map(|line| format!("{line}\n")).collect();
        let mut harness = EditorTestHarness::new(80, 24).unwrap();
        let path = harness.open_with_content("roundtrip.txt", &content).unwrap();

        // Type and remove a character so the save is a real write
        harness.type_text("x").unwrap();
        harness.send_key(KeyCode::Backspace, KeyModifiers::NONE).unwrap();
        harness.send_key(KeyCode::Char('s'), KeyModifiers::CONTROL).unwrap();

        prop_assert_eq!(std::fs::read_to_string(&path).unwrap(), content.clone());
        let mut reopened = EditorTestHarness::new(80, 24).unwrap();
        reopened.open_file(&path).unwrap();
        prop_assert_eq!(reopened.get_buffer_content(), content);
    }
}
