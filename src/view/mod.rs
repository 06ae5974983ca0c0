//! Terminal rendering with ratatui
//!
//! The renderer only reads editor state. Call [`crate::app::Editor::scroll`]
//! before drawing so the viewport contains the cursor.

pub mod status_bar;
pub mod text_area;

use crate::app::Editor;
use crate::primitives::highlighter::HighlightClass;
use ratatui::layout::{Constraint, Layout, Position as ScreenPosition};
use ratatui::style::{Color, Style};
use ratatui::Frame;

pub use status_bar::StatusBarRenderer;
pub use text_area::TextAreaRenderer;

/// Foreground colour of a highlight class
pub fn highlight_style(class: HighlightClass) -> Style {
    let style = Style::default();
    match class {
        HighlightClass::Normal => style,
        HighlightClass::Number => style.fg(Color::Red),
        HighlightClass::Match => style.fg(Color::Blue),
        HighlightClass::String => style.fg(Color::Magenta),
        HighlightClass::Comment | HighlightClass::MultilineComment => style.fg(Color::Cyan),
        HighlightClass::Keyword1 => style.fg(Color::Yellow),
        HighlightClass::Keyword2 => style.fg(Color::Green),
    }
}

/// Draw the whole editor: text area, status bar and message bar
pub fn render(frame: &mut Frame, editor: &Editor) {
    let [text_area, status_area, message_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    TextAreaRenderer::render(frame, text_area, editor.document());
    StatusBarRenderer::render_status_bar(frame, status_area, editor);
    StatusBarRenderer::render_message_bar(frame, message_area, editor);

    let cursor = match editor.prompt() {
        Some(prompt) => ScreenPosition::new(
            message_area.x + prompt.display().chars().count() as u16,
            message_area.y,
        ),
        None => {
            let doc = editor.document();
            let (row_offset, col_offset) = doc.viewport();
            let (_, cy) = doc.cursor();
            ScreenPosition::new(
                text_area.x + doc.rx().saturating_sub(col_offset) as u16,
                text_area.y + cy.saturating_sub(row_offset) as u16,
            )
        }
    };
    frame.set_cursor_position(cursor);
}
