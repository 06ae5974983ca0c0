//! Undo/redo over whole-document snapshots
//!
//! Both stacks are bounded by `max_depth`; when full, the oldest snapshot is
//! dropped. A fresh capture clears the redo stack. The pushes performed by
//! `undo` and `redo` themselves do not.

use crate::error::{EditorError, EditorResult};
use crate::model::document::Document;
use crate::model::snapshot::Snapshot;
use std::collections::VecDeque;

pub const DEFAULT_MAX_DEPTH: usize = 1000;

#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    max_depth: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl HistoryManager {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    fn push(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, max_depth: usize) -> EditorResult<()> {
        while stack.len() >= max_depth {
            stack.pop_front();
        }
        stack.try_reserve(1)?;
        stack.push_back(snapshot);
        Ok(())
    }

    /// Record the document's current state before a mutating edit
    pub fn capture_and_push_undo(&mut self, document: &Document) -> EditorResult<()> {
        self.push_undo(Snapshot::capture(document)?)
    }

    /// Push a snapshot taken before an edit that has since been applied
    pub fn push_undo(&mut self, snapshot: Snapshot) -> EditorResult<()> {
        Self::push(&mut self.undo_stack, snapshot, self.max_depth)?;
        self.redo_stack.clear();
        tracing::debug!("undo snapshot captured ({} on stack)", self.undo_stack.len());
        Ok(())
    }

    /// Restore the most recent undo snapshot, saving the current state for redo
    pub fn undo(&mut self, document: &mut Document) -> EditorResult<()> {
        if self.undo_stack.is_empty() {
            return Err(EditorError::EmptyHistory);
        }
        let current = Snapshot::capture(document)?;
        let Some(previous) = self.undo_stack.pop_back() else {
            return Err(EditorError::EmptyHistory);
        };
        Self::push(&mut self.redo_stack, current, self.max_depth)?;
        previous.restore_into(document)?;
        tracing::debug!(
            "undo applied ({} undo, {} redo)",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(())
    }

    /// Restore the most recent redo snapshot, saving the current state for undo
    pub fn redo(&mut self, document: &mut Document) -> EditorResult<()> {
        if self.redo_stack.is_empty() {
            return Err(EditorError::EmptyHistory);
        }
        let current = Snapshot::capture(document)?;
        let Some(next) = self.redo_stack.pop_back() else {
            return Err(EditorError::EmptyHistory);
        };
        Self::push(&mut self.undo_stack, current, self.max_depth)?;
        next.restore_into(document)?;
        tracing::debug!(
            "redo applied ({} undo, {} redo)",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::{DocumentOptions, Position};

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(DocumentOptions::default(), lines.iter().map(|l| l.as_bytes())).unwrap()
    }

    fn texts(doc: &Document) -> Vec<Vec<u8>> {
        doc.rows().iter().map(|r| r.raw().to_vec()).collect()
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut history = HistoryManager::default();
        let mut d = doc(&["abc"]);
        assert!(matches!(history.undo(&mut d), Err(EditorError::EmptyHistory)));
        assert!(matches!(history.redo(&mut d), Err(EditorError::EmptyHistory)));
        assert_eq!(texts(&d), vec![b"abc".to_vec()]);
        assert!(!d.is_dirty());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = HistoryManager::default();
        let mut d = doc(&["abc"]);
        d.move_end();

        history.capture_and_push_undo(&d).unwrap();
        d.insert_newline_at_cursor().unwrap();
        d.insert_char_at_cursor(b'x').unwrap();
        let after = texts(&d);
        let after_cursor = d.cursor();

        history.undo(&mut d).unwrap();
        assert_eq!(texts(&d), vec![b"abc".to_vec()]);
        assert_eq!(d.cursor_position(), Position { row: 0, offset: 3 });
        assert!(history.can_redo());

        history.redo(&mut d).unwrap();
        assert_eq!(texts(&d), after);
        assert_eq!(d.cursor(), after_cursor);
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn test_fresh_capture_clears_redo() {
        let mut history = HistoryManager::default();
        let mut d = doc(&["a"]);
        history.capture_and_push_undo(&d).unwrap();
        d.insert_char_at_cursor(b'b').unwrap();
        history.undo(&mut d).unwrap();
        assert!(history.can_redo());

        history.capture_and_push_undo(&d).unwrap();
        assert!(!history.can_redo());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = HistoryManager::new(3);
        let mut d = doc(&[""]);
        for byte in b"abcde" {
            history.capture_and_push_undo(&d).unwrap();
            d.insert_char_at_cursor(*byte).unwrap();
        }
        assert_eq!(history.undo_depth(), 3);
        for _ in 0..3 {
            history.undo(&mut d).unwrap();
        }
        // The two oldest states were dropped
        assert_eq!(texts(&d), vec![b"ab".to_vec()]);
        assert!(history.undo(&mut d).is_err());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_undo_restores_prior_state(
                edits in proptest::collection::vec((0u8..4, b'a'..=b'z'), 1..25),
            ) {
                let mut history = HistoryManager::default();
                let mut d = doc(&["start"]);
                let mut states = Vec::new();

                for (kind, byte) in &edits {
                    states.push((texts(&d), d.cursor()));
                    history.capture_and_push_undo(&d).unwrap();
                    let _ = match kind {
                        0 => d.insert_char_at_cursor(*byte),
                        1 => d.delete_char_at_cursor(),
                        2 => d.insert_newline_at_cursor(),
                        _ => d.insert_text_at_cursor(b"x\ny"),
                    };
                }
                let final_state = (texts(&d), d.cursor());

                for expected in states.iter().rev() {
                    history.undo(&mut d).unwrap();
                    prop_assert_eq!(&(texts(&d), d.cursor()), expected);
                }
                for _ in &edits {
                    history.redo(&mut d).unwrap();
                }
                prop_assert_eq!((texts(&d), d.cursor()), final_state);
            }
        }
    }
}
