use super::highlight_style;
use crate::model::document::Document;
use crate::primitives::highlighter::HighlightClass;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Renders the gutter and document rows
pub struct TextAreaRenderer;

impl TextAreaRenderer {
    pub fn render(frame: &mut Frame, area: Rect, doc: &Document) {
        let (row_offset, col_offset) = doc.viewport();
        let height = area.height as usize;
        let width = area.width as usize;

        let lines: Vec<Line> = (0..height)
            .map(|y| {
                let file_row = row_offset + y;
                if file_row < doc.row_count() {
                    Self::row_line(doc, file_row, col_offset, width)
                } else if doc.is_empty() && y == height / 3 {
                    Self::welcome_line()
                } else {
                    Line::from("~")
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn welcome_line() -> Line<'static> {
        Line::from(format!("scoom editor -- version {}", env!("CARGO_PKG_VERSION")))
            .alignment(Alignment::Center)
    }

    /// One screen line: the gutter, then the visible part of `render` styled
    /// by highlight class, selection and control-character escapes.
    pub fn row_line(doc: &Document, row: usize, col_offset: usize, width: usize) -> Line<'static> {
        let mut spans = Vec::new();
        let gutter = doc.gutter(row);
        if gutter > 0 {
            spans.push(Span::styled(
                format!("{:<width$}", row + 1, width = gutter),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        let Some(text) = doc.row(row) else {
            return Line::from(spans);
        };
        let render = text.render();
        let highlight = text.highlight();
        let start = col_offset.min(render.len());
        let end = (start + width.saturating_sub(gutter)).min(render.len());
        let selection = doc.selection_render_span(row);

        let mut run: Vec<u8> = Vec::new();
        let mut run_style = Style::default();
        for i in start..end {
            let byte = render[i];
            let class = highlight.get(i).copied().unwrap_or(HighlightClass::Normal);
            let mut style = highlight_style(class);
            if selection.is_some_and(|(from, to)| i >= from && i < to) {
                style = style.add_modifier(Modifier::REVERSED);
            }

            if byte.is_ascii_control() {
                flush(&mut spans, &mut run, run_style);
                let glyph = if byte < 32 { (b'@' + byte) as char } else { '?' };
                spans.push(Span::styled(
                    glyph.to_string(),
                    style.add_modifier(Modifier::REVERSED),
                ));
                continue;
            }
            if style != run_style {
                flush(&mut spans, &mut run, run_style);
                run_style = style;
            }
            run.push(byte);
        }
        flush(&mut spans, &mut run, run_style);
        Line::from(spans)
    }
}

fn flush(spans: &mut Vec<Span<'static>>, run: &mut Vec<u8>, style: Style) {
    if run.is_empty() {
        return;
    }
    spans.push(Span::styled(String::from_utf8_lossy(run).into_owned(), style));
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::{Direction, DocumentOptions, Position};
    use crate::primitives::language::language_by_name;
    use ratatui::style::Color;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_row_line_gutter_and_tabs() {
        let doc = Document::from_lines(DocumentOptions::default(), ["\tx"]).unwrap();
        let line = TextAreaRenderer::row_line(&doc, 0, 0, 80);
        assert_eq!(line_text(&line), "1     x");
    }

    #[test]
    fn test_row_line_colors_keywords() {
        let mut doc = Document::from_lines(DocumentOptions::default(), ["int x;"]).unwrap();
        doc.set_language(language_by_name("C"));
        let line = TextAreaRenderer::row_line(&doc, 0, 0, 80);
        assert_eq!(line.spans[1].content, "int");
        assert_eq!(line.spans[1].style.fg, Some(Color::Green));
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let doc = Document::from_lines(DocumentOptions::default(), [b"a\x01b".as_slice()]).unwrap();
        let line = TextAreaRenderer::row_line(&doc, 0, 0, 80);
        // 0x01 is shown as ^A
        assert_eq!(line_text(&line), "1 aAb");
    }

    #[test]
    fn test_selection_is_reversed_and_clipped() {
        let mut doc = Document::from_lines(DocumentOptions::default(), ["abcdef"]).unwrap();
        doc.set_cursor_position(Position { row: 0, offset: 1 });
        doc.select_move(Direction::Right).unwrap();
        let line = TextAreaRenderer::row_line(&doc, 0, 0, 6);
        assert_eq!(line_text(&line), "1 abcd");
        let selected: Vec<_> = line
            .spans
            .iter()
            .filter(|s| s.style.add_modifier.contains(Modifier::REVERSED))
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].content, "b");
    }
}
