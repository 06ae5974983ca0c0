//! Syntax highlighting for a single rendered row
//!
//! # Design
//! - **Row at a time**: a row is annotated from its `render` buffer alone plus
//!   one bit of state carried in from the previous row (an open block comment).
//! - **Cascade is the caller's job**: [`annotate_row`] reports whether a block
//!   comment is still open at the end of the row. When that value changes, the
//!   document re-annotates the following rows until the carried state settles.

use crate::primitives::column::is_separator;
use crate::primitives::language::LanguageProfile;

/// Highlight class assigned to each rendered byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightClass {
    #[default]
    Normal,
    Number,
    /// Current search match
    Match,
    String,
    Comment,
    MultilineComment,
    /// Statement keyword
    Keyword1,
    /// Type keyword (`|` suffix in the keyword table)
    Keyword2,
}

fn fill(highlight: &mut [HighlightClass], start: usize, len: usize, class: HighlightClass) {
    let end = (start + len).min(highlight.len());
    highlight[start..end].fill(class);
}

/// Length and class of the first keyword in table order that starts at `i`
/// and is followed by a separator (or the end of the row).
fn match_keyword(render: &[u8], i: usize, keywords: &[&str]) -> Option<(usize, HighlightClass)> {
    keywords.iter().find_map(|keyword| {
        let (word, class) = match keyword.strip_suffix('|') {
            Some(word) => (word, HighlightClass::Keyword2),
            None => (*keyword, HighlightClass::Keyword1),
        };
        let word = word.as_bytes();
        let next = render.get(i + word.len()).copied().unwrap_or(0);
        (render[i..].starts_with(word) && is_separator(next)).then_some((word.len(), class))
    })
}

/// Recompute `highlight` for one row.
///
/// `highlight` is resized to `render.len()` and reset to
/// [`HighlightClass::Normal`] before scanning. Without a language every byte
/// stays `Normal`. Returns whether a block comment is open at the end of the
/// row.
pub fn annotate_row(
    render: &[u8],
    highlight: &mut Vec<HighlightClass>,
    language: Option<&LanguageProfile>,
    comment_open_at_start: bool,
) -> bool {
    highlight.clear();
    highlight.resize(render.len(), HighlightClass::Normal);

    let Some(language) = language else {
        return false;
    };

    let single_line = language
        .single_line_comment
        .filter(|_| language.flags.comments)
        .map(str::as_bytes);
    let multi_line = language
        .multiline_comment
        .filter(|_| language.flags.multiline_comments)
        .map(|(start, end)| (start.as_bytes(), end.as_bytes()));

    let mut i = 0;
    let mut prev_separator = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = comment_open_at_start && multi_line.is_some();

    while i < render.len() {
        let c = render[i];
        let prev_class = if i > 0 {
            highlight[i - 1]
        } else {
            HighlightClass::Normal
        };

        if let Some(marker) = single_line {
            if in_string.is_none() && !in_comment && render[i..].starts_with(marker) {
                fill(highlight, i, render.len() - i, HighlightClass::Comment);
                break;
            }
        }

        if let Some((start, end)) = multi_line {
            if in_string.is_none() {
                if in_comment {
                    if render[i..].starts_with(end) {
                        fill(highlight, i, end.len(), HighlightClass::MultilineComment);
                        i += end.len();
                        in_comment = false;
                    } else {
                        highlight[i] = HighlightClass::MultilineComment;
                        i += 1;
                    }
                    prev_separator = true;
                    continue;
                } else if render[i..].starts_with(start) {
                    fill(highlight, i, start.len(), HighlightClass::MultilineComment);
                    i += start.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        if language.flags.strings {
            if let Some(quote) = in_string {
                highlight[i] = HighlightClass::String;
                if c == b'\\' && i + 1 < render.len() {
                    highlight[i + 1] = HighlightClass::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_separator = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                highlight[i] = HighlightClass::String;
                i += 1;
                continue;
            }
        }

        if language.flags.numbers
            && ((c.is_ascii_digit() && (prev_separator || prev_class == HighlightClass::Number))
                || (c == b'.' && prev_class == HighlightClass::Number))
        {
            highlight[i] = HighlightClass::Number;
            prev_separator = false;
            i += 1;
            continue;
        }

        if prev_separator {
            if let Some((len, class)) = match_keyword(render, i, language.keywords) {
                fill(highlight, i, len, class);
                i += len;
                continue;
            }
        }

        prev_separator = is_separator(c);
        i += 1;
    }

    in_comment
}
