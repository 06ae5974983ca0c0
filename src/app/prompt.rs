//! One-line prompts shown in the message bar

use crate::primitives::highlighter::HighlightClass;

/// What a prompt does with its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptType {
    /// Save the document under a new file name
    SaveFileAs,
    /// Incremental search through rendered rows
    Search,
}

/// State of an incremental search between keystrokes
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Row of the last match
    pub last_match: Option<usize>,
    pub forward: bool,
    /// Highlight of the matched row before it was painted
    pub saved_highlight: Option<(usize, Vec<HighlightClass>)>,
    /// Cursor and viewport to return to when the search is cancelled
    pub saved_cursor: (usize, usize),
    pub saved_viewport: (usize, usize),
}

#[derive(Debug, Clone)]
pub struct Prompt {
    /// Text shown before the input (e.g. "Save as: ")
    pub message: String,
    pub input: String,
    pub prompt_type: PromptType,
    pub search: Option<SearchState>,
}

impl Prompt {
    pub fn new(message: String, prompt_type: PromptType) -> Self {
        Self {
            message,
            input: String::new(),
            prompt_type,
            search: None,
        }
    }

    pub fn search(message: String, saved_cursor: (usize, usize), saved_viewport: (usize, usize)) -> Self {
        Self {
            search: Some(SearchState {
                forward: true,
                saved_cursor,
                saved_viewport,
                ..SearchState::default()
            }),
            ..Self::new(message, PromptType::Search)
        }
    }

    /// Message and input as displayed
    pub fn display(&self) -> String {
        format!("{}{}", self.message, self.input)
    }
}

/// Position of `query` in `haystack`
pub(crate) fn find_bytes(haystack: &[u8], query: &[u8]) -> Option<usize> {
    if query.is_empty() || query.len() > haystack.len() {
        return None;
    }
    haystack.windows(query.len()).position(|window| window == query)
}
