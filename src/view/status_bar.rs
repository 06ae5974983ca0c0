//! Status bar and message bar rendering

use crate::app::Editor;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Renders the status bar and the prompt/message line
pub struct StatusBarRenderer;

impl StatusBarRenderer {
    /// Reverse-video bar: file name, line count and modified flag on the
    /// left; file type and cursor line on the right.
    pub fn render_status_bar(frame: &mut Frame, area: Rect, editor: &Editor) {
        let text = Self::status_text(editor, area.width as usize);
        let line = Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::REVERSED),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }

    /// The prompt when one is open, otherwise the unexpired status message
    pub fn render_message_bar(frame: &mut Frame, area: Rect, editor: &Editor) {
        let text = match editor.prompt() {
            Some(prompt) => prompt.display(),
            None => editor.get_status_message().unwrap_or_default().to_string(),
        };
        frame.render_widget(Paragraph::new(Line::from(text)), area);
    }

    pub fn status_text(editor: &Editor, width: usize) -> String {
        let doc = editor.document();
        let name = editor
            .filename()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string());
        let name: String = name.chars().take(20).collect();
        let modified = if doc.is_dirty() { "(modified)" } else { "" };
        let left = format!("{} - {} lines {}", name, doc.row_count(), modified);

        let file_type = doc.language().map_or("no ft", |profile| profile.name);
        let (_, cy) = doc.cursor();
        let right = format!("{} | {}/{}", file_type, cy + 1, doc.row_count());

        let left: String = left.chars().take(width).collect();
        let used = left.chars().count();
        let right_len = right.chars().count();
        if used + right_len <= width {
            format!("{left}{}{right}", " ".repeat(width - used - right_len))
        } else {
            format!("{left:<width$}")
        }
    }
}
