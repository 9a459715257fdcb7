use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::Model;
use crate::ui::style::Theme;

/// Key legend shown in the help line.
pub const HELP_KEYS: [(&str, &str); 7] = [
    ("tab", "Switch Focus"),
    ("ctrl+c", "Copy/Quit"),
    ("ctrl+v", "Paste"),
    ("ctrl+x", "Cut"),
    ("F2", "Layout"),
    ("ctrl+q", "Quit"),
    ("↑/↓", "Scroll"),
];

/// Mode, last clipboard operation, and whether this session copied text.
pub fn status_text(model: &Model) -> String {
    let mut parts = vec![model.active_pane().mode_label()];
    if let Some(label) = model.clipboard.last_operation.label() {
        parts.push(label);
    }
    if !model.clipboard.last_selection.is_empty() {
        parts.push("Text in clipboard");
    }
    parts.join(" | ")
}

pub fn render_status_bar(model: &Model, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let style = if model.clipboard.last_operation.is_failure() {
        theme.status_error
    } else {
        theme.status
    };
    Paragraph::new(format!(" {} ", status_text(model)))
        .style(style)
        .render(area, buf);
}

pub fn render_help_bar(theme: &Theme, area: Rect, buf: &mut Buffer) {
    let mut spans = Vec::with_capacity(HELP_KEYS.len() * 3);
    for (idx, (key, desc)) in HELP_KEYS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" • ", theme.help));
        }
        spans.push(Span::styled(*key, theme.help_key));
        spans.push(Span::styled(format!(" {desc}"), theme.help));
    }
    Paragraph::new(Line::from(spans))
        .style(theme.help)
        .alignment(Alignment::Center)
        .render(area, buf);
}
