//! Coordinate mapping between raw byte columns and rendered columns
//!
//! Three coordinate spaces meet here:
//! - the raw byte offset into a row (`cx` minus the gutter),
//! - the rendered column, where each tab expands to the next tab stop (`rx`),
//! - the gutter-adjusted column, which adds the width of the line-number
//!   prefix drawn in front of every row.
//!
//! Column math is byte oriented. Multi-byte UTF-8 text misaligns `cx`/`rx`.
//!
//! The structural scanners (word boundaries, bracket spans, indent deltas)
//! live here as well because they share the same byte-level view of a row.

/// Tab stop distance used when no configuration overrides it
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Number of decimal digits needed to print `n` (at least 1)
pub fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Width of the line-number prefix for the row at `row_index`: the 1-based
/// line number followed by one separator space.
pub fn gutter_width(row_index: usize) -> usize {
    digit_count(row_index + 1) + 1
}

/// Rendered column for raw byte offset `cx`. Offsets past the end of the row
/// map to the rendered width of the whole row.
pub fn cx_to_rx(raw: &[u8], cx: usize, tab_width: usize) -> usize {
    let mut rx = 0;
    for &byte in raw.iter().take(cx) {
        if byte == b'\t' {
            rx += (tab_width - 1) - (rx % tab_width);
        }
        rx += 1;
    }
    rx
}

/// Raw byte offset for rendered column `rx`: the first offset whose
/// cumulative rendered width exceeds `rx`, or `raw.len()` when `rx` lies past
/// the rendered end of the row.
pub fn rx_to_cx(raw: &[u8], rx: usize, tab_width: usize) -> usize {
    let mut cur_rx = 0;
    for (cx, &byte) in raw.iter().enumerate() {
        if byte == b'\t' {
            cur_rx += (tab_width - 1) - (cur_rx % tab_width);
        }
        cur_rx += 1;
        if cur_rx > rx {
            return cx;
        }
    }
    raw.len()
}

/// Expand tabs to spaces up to the next multiple of `tab_width`
pub fn expand_tabs(raw: &[u8], tab_width: usize) -> Vec<u8> {
    let tabs = raw.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(raw.len() + tabs * (tab_width - 1));
    for &byte in raw {
        if byte == b'\t' {
            render.push(b' ');
            while render.len() % tab_width != 0 {
                render.push(b' ');
            }
        } else {
            render.push(byte);
        }
    }
    render
}

/// Count of leading tab bytes
pub fn leading_tabs(raw: &[u8]) -> usize {
    raw.iter().take_while(|&&b| b == b'\t').count()
}

/// Separator bytes end identifiers, numbers and keywords.
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0 || b",.()+-/*=~%<>[];".contains(&byte)
}

/// Identifier bytes for word-wise movement: `[A-Za-z_]`
pub fn is_word_char(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

pub fn is_opening_bracket(byte: u8) -> bool {
    closing_bracket(byte).is_some()
}

/// Closer paired with an opening bracket, paren or brace
pub fn closing_bracket(byte: u8) -> Option<u8> {
    match byte {
        b'{' => Some(b'}'),
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        _ => None,
    }
}

/// Offset reached by skipping forward over non-word bytes, then word bytes
pub fn word_end_forward(raw: &[u8], offset: usize) -> usize {
    let mut pos = offset.min(raw.len());
    while pos < raw.len() && !is_word_char(raw[pos]) {
        pos += 1;
    }
    while pos < raw.len() && is_word_char(raw[pos]) {
        pos += 1;
    }
    pos
}

/// Offset reached by skipping backward over non-word bytes, then word bytes.
/// Stops at the first byte of the word.
pub fn word_start_backward(raw: &[u8], offset: usize) -> usize {
    let mut pos = offset.min(raw.len());
    while pos > 0 && !is_word_char(raw[pos - 1]) {
        pos -= 1;
    }
    while pos > 0 && is_word_char(raw[pos - 1]) {
        pos -= 1;
    }
    pos
}

/// Tracks double-quoted strings while scanning for brackets.
/// A quote preceded by a backslash does not toggle the state.
struct QuoteTracker {
    in_string: bool,
}

impl QuoteTracker {
    fn new() -> Self {
        Self { in_string: false }
    }

    /// Feed the byte at `i`; returns true when the byte is code (outside a
    /// string and not a quote itself).
    fn is_code(&mut self, raw: &[u8], i: usize) -> bool {
        if raw[i] == b'"' && (i == 0 || raw[i - 1] != b'\\') {
            self.in_string = !self.in_string;
            return false;
        }
        !self.in_string
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndentToken {
    Open,
    Close,
}

/// Stack of bracket tokens: openers push, a closer pops a matching opener or
/// pushes itself when none is pending.
fn scan_brackets(raw: &[u8], open: u8, close: Option<u8>) -> Vec<IndentToken> {
    let mut stack = Vec::new();
    let mut quotes = QuoteTracker::new();
    for i in 0..raw.len() {
        if !quotes.is_code(raw, i) {
            continue;
        }
        let byte = raw[i];
        if byte == open {
            stack.push(IndentToken::Open);
        } else if Some(byte) == close {
            if stack.last() == Some(&IndentToken::Open) {
                stack.pop();
            } else {
                stack.push(IndentToken::Close);
            }
        }
    }
    stack
}

/// A row is a compound statement when it contains braces and every brace is
/// balanced, e.g. `if (x) {}`.
pub fn is_compound_statement(raw: &[u8]) -> bool {
    if !raw.iter().any(|&b| b == b'{' || b == b'}') {
        return false;
    }
    scan_brackets(raw, b'{', Some(b'}')).is_empty()
}

/// If the cursor at `offset` sits inside a `{` opened earlier on the row and
/// the `}` closing that brace follows on the same row, returns its offset.
pub fn open_bracket_span_end(raw: &[u8], offset: usize) -> Option<usize> {
    let offset = offset.min(raw.len());
    let mut depth = 0usize;
    let mut quotes = QuoteTracker::new();
    for i in 0..offset {
        if !quotes.is_code(raw, i) {
            continue;
        }
        match raw[i] {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    if depth == 0 {
        return None;
    }

    // Braces nested after the cursor must close before ours does
    let mut nested = 0usize;
    for i in offset..raw.len() {
        if !quotes.is_code(raw, i) {
            continue;
        }
        match raw[i] {
            b'{' => nested += 1,
            b'}' if nested == 0 => return Some(i),
            b'}' => nested -= 1,
            _ => {}
        }
    }
    None
}

/// Net indentation change for a new line split at the end of `prefix`:
/// remaining opener tokens minus remaining closer tokens. Languages without an
/// indent-end character (`indent_end == None`) only ever indent deeper.
pub fn compute_indent_delta(prefix: &[u8], indent_start: u8, indent_end: Option<u8>) -> isize {
    scan_brackets(prefix, indent_start, indent_end)
        .iter()
        .map(|token| match token {
            IndentToken::Open => 1,
            IndentToken::Close => -1,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_count_and_gutter() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(12345), 5);
        assert_eq!(gutter_width(0), 2);
        assert_eq!(gutter_width(8), 2);
        // Row index 9 is line 10
        assert_eq!(gutter_width(9), 3);
        assert_eq!(gutter_width(99), 4);
    }

    #[test]
    fn test_cx_to_rx_with_tabs() {
        let raw = b"\tfoo";
        assert_eq!(cx_to_rx(raw, 0, 4), 0);
        assert_eq!(cx_to_rx(raw, 1, 4), 4);
        assert_eq!(cx_to_rx(raw, 4, 4), 7);
        // past the end clamps to the rendered width
        assert_eq!(cx_to_rx(raw, 10, 4), 7);

        let raw = b"ab\tc";
        assert_eq!(cx_to_rx(raw, 3, 4), 4);
    }

    #[test]
    fn test_rx_to_cx_with_tabs() {
        let raw = b"\tfoo";
        assert_eq!(rx_to_cx(raw, 0, 4), 0);
        // Every column inside the expanded tab maps back to the tab byte
        assert_eq!(rx_to_cx(raw, 3, 4), 0);
        assert_eq!(rx_to_cx(raw, 4, 4), 1);
        assert_eq!(rx_to_cx(raw, 6, 4), 3);
        assert_eq!(rx_to_cx(raw, 50, 4), 4);
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs(b"\tfoo", 4), b"    foo");
        assert_eq!(expand_tabs(b"ab\tc", 4), b"ab  c");
        assert_eq!(expand_tabs(b"abcd\t", 4), b"abcd    ");
        assert_eq!(expand_tabs(b"\t\t", 2), b"    ");
        assert_eq!(leading_tabs(b"\t\tx\t"), 2);
    }

    #[test]
    fn test_word_boundaries() {
        let raw = b"foo  bar_baz(1)";
        assert_eq!(word_end_forward(raw, 0), 3);
        assert_eq!(word_end_forward(raw, 3), 12);
        assert_eq!(word_end_forward(raw, 12), 15);
        assert_eq!(word_start_backward(raw, 12), 5);
        assert_eq!(word_start_backward(raw, 5), 0);
        assert_eq!(word_start_backward(raw, 0), 0);
    }

    #[test]
    fn test_compound_statement() {
        assert!(is_compound_statement(b"if (x) {}"));
        assert!(is_compound_statement(b"{ a; } { b; }"));
        assert!(!is_compound_statement(b"int main() {"));
        assert!(!is_compound_statement(b"no braces"));
        // braces inside strings do not count
        assert!(!is_compound_statement(b"x = \"}\" {"));
    }

    #[test]
    fn test_open_bracket_span_end() {
        let raw = b"int main() {}";
        assert_eq!(open_bracket_span_end(raw, 12), Some(12));
        assert_eq!(open_bracket_span_end(raw, 11), None);
        assert_eq!(open_bracket_span_end(raw, 13), None);
        assert_eq!(open_bracket_span_end(b"{ a }", 2), Some(4));
        // The closer of the enclosing brace, not the first `}` after the cursor
        assert_eq!(open_bracket_span_end(b"{ {x} }", 1), Some(6));
        assert_eq!(open_bracket_span_end(b"{ {x} }", 3), Some(4));
        assert_eq!(open_bracket_span_end(b"{ \"}\" }", 1), Some(6));
    }

    #[test]
    fn test_indent_delta() {
        assert_eq!(compute_indent_delta(b"int main() {", b'{', Some(b'}')), 1);
        assert_eq!(compute_indent_delta(b"} else {", b'{', Some(b'}')), 0);
        assert_eq!(compute_indent_delta(b"}", b'{', Some(b'}')), -1);
        assert_eq!(compute_indent_delta(b"{{", b'{', Some(b'}')), 2);
        assert_eq!(compute_indent_delta(b"s = \"{\"", b'{', Some(b'}')), 0);
        assert_eq!(compute_indent_delta(b"if x:", b':', None), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Without tabs the two mappings are inverse
            #[test]
            fn rx_cx_round_trip_without_tabs(raw in "[ -~]{0,60}", cx in 0usize..80) {
                let raw = raw.as_bytes();
                let cx = cx.min(raw.len());
                let rx = cx_to_rx(raw, cx, DEFAULT_TAB_WIDTH);
                prop_assert_eq!(rx, cx);
                prop_assert_eq!(rx_to_cx(raw, rx, DEFAULT_TAB_WIDTH), cx);
            }

            /// With tabs, mapping a raw offset out and back is still exact
            #[test]
            fn rx_cx_round_trip_with_tabs(raw in "[a-z\t ]{0,40}", cx in 0usize..50) {
                let raw = raw.as_bytes();
                let cx = cx.min(raw.len());
                let rx = cx_to_rx(raw, cx, DEFAULT_TAB_WIDTH);
                prop_assert_eq!(rx_to_cx(raw, rx, DEFAULT_TAB_WIDTH), cx);
            }

            /// Tab expansion drops every tab and keeps the other bytes in order
            #[test]
            fn expand_tabs_preserves_non_tab_bytes(raw in "[a-z\t ]{0,40}") {
                let raw = raw.as_bytes();
                let render = expand_tabs(raw, DEFAULT_TAB_WIDTH);
                prop_assert!(!render.contains(&b'\t'));
                prop_assert_eq!(render.len(), cx_to_rx(raw, raw.len(), DEFAULT_TAB_WIDTH));
                let kept: Vec<u8> = raw.iter().copied().filter(|&b| b != b'\t' && b != b' ').collect();
                let rendered: Vec<u8> = render.iter().copied().filter(|&b| b != b' ').collect();
                prop_assert_eq!(kept, rendered);
            }
        }
    }
}
