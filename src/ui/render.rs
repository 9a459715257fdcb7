use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Model;
use crate::app::focus::Pane;
use crate::ui::layout::{FOOTER_ROWS, TITLE_ROWS};
use crate::ui::status;
use crate::ui::style::{SPINNER_FRAMES, Theme, classify_preview_line};

/// Application name shown in the title bar.
pub const TITLE: &str = "Screen.md";

const EDITOR_PLACEHOLDER: &str = "Enter markdown here...";

/// Draw the whole session into `frame`.
pub fn render(model: &Model, theme: &Theme, frame: &mut Frame) {
    let _scope = crate::perf::scope("ui.render");
    frame.render_widget(SessionView::new(model, theme), frame.area());
}

/// Draw the session off-screen at the model's terminal size and return the
/// frame as text, one line per row with trailing blanks trimmed.
pub fn frame_text(model: &Model, theme: &Theme) -> String {
    let (width, height) = model.terminal_size;
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    SessionView::new(model, theme).render(area, &mut buf);
    buffer_text(&buf)
}

fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut rows = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut row = String::new();
        let mut skip = 0usize;
        for x in area.left()..area.right() {
            if skip > 0 {
                // hidden behind a wide character
                skip -= 1;
                continue;
            }
            let symbol = buf[(x, y)].symbol();
            row.push_str(symbol);
            skip = symbol.width().saturating_sub(1);
        }
        rows.push(row.trim_end().to_string());
    }
    rows.join("\n")
}

/// The full-screen widget: title, panes, status and help lines, or the
/// loading view before the terminal size is known.
struct SessionView<'a> {
    model: &'a Model,
    theme: &'a Theme,
}

impl<'a> SessionView<'a> {
    const fn new(model: &'a Model, theme: &'a Theme) -> Self {
        Self { model, theme }
    }

    fn render_loading(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let frame = SPINNER_FRAMES[self.model.spinner_frame % SPINNER_FRAMES.len()];
        let line_area = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        Paragraph::new(format!("{frame} Loading {TITLE}..."))
            .style(self.theme.loading)
            .alignment(Alignment::Center)
            .render(line_area, buf);
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(vec![
            Span::raw("  "),
            Span::styled(TITLE, self.theme.title),
        ]);
        Paragraph::new(title).render(area, buf);
    }

    fn pane_block(&self, pane: Pane, title: &'a str) -> Block<'a> {
        let active = self.model.active_pane() == pane;
        let border = match (pane, active) {
            (Pane::Editor, true) => self.theme.editor_border,
            (Pane::Preview, true) => self.theme.preview_border,
            (_, false) => self.theme.inactive_border,
        };
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(title)
    }

    fn render_editor(&self, area: Rect, buf: &mut Buffer) {
        let model = self.model;
        let theme = self.theme;
        let block = self.pane_block(Pane::Editor, " Editor ");
        let inner = block.inner(area);
        block.render(area, buf);

        let doc = &model.document;
        let active = model.active_pane() == Pane::Editor;
        let cursor_style = if active {
            theme.cursor
        } else {
            theme.text
        };

        if doc.text().is_empty() {
            let placeholder = Line::from(vec![
                Span::styled(" ", cursor_style),
                Span::styled(EDITOR_PLACEHOLDER, theme.placeholder),
            ]);
            Paragraph::new(placeholder).render(inner, buf);
            return;
        }

        let gutter_width = if model.show_line_numbers {
            line_number_width(doc.line_count())
        } else {
            0
        };
        let gutter_total = if gutter_width > 0 { gutter_width + 1 } else { 0 };
        let text_width = usize::from(inner.width.saturating_sub(gutter_total));

        // Shift every line left so the cursor column stays on screen.
        let (cursor_line, cursor_col) = doc.cursor_position();
        let cursor_x = doc.current_line()[..cursor_col].width();
        let h_offset = cursor_x.saturating_sub(text_width.saturating_sub(1));

        let range = model.editor_viewport.visible_range();
        let lines: Vec<Line> = doc
            .lines()
            .enumerate()
            .skip(range.start)
            .take(range.len())
            .map(|(idx, text)| {
                let mut spans = Vec::with_capacity(4);
                if gutter_width > 0 {
                    spans.push(Span::styled(
                        format!("{:>width$} ", idx + 1, width = usize::from(gutter_width)),
                        theme.line_number,
                    ));
                }
                if idx != cursor_line {
                    spans.push(Span::styled(skip_columns(text, h_offset), theme.text));
                    return Line::from(spans);
                }

                let (before, rest) = text.split_at(cursor_col);
                let mut rest_chars = rest.chars();
                let under_cursor = rest_chars.next().map_or_else(|| " ".to_string(), String::from);
                spans.push(Span::styled(skip_columns(before, h_offset), theme.text));
                spans.push(Span::styled(under_cursor, cursor_style));
                spans.push(Span::styled(rest_chars.as_str(), theme.text));
                Line::from(spans).style(theme.cursor_line)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_preview(&self, area: Rect, buf: &mut Buffer) {
        let model = self.model;
        let theme = self.theme;
        let viewport = &model.preview_viewport;
        let mut block = self.pane_block(Pane::Preview, " Preview ");
        if viewport.can_scroll_up() || viewport.can_scroll_down() {
            block = block.title_top(Line::from(format!(" {}% ", viewport.scroll_percent())).right_aligned());
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = model
            .visible_preview_lines()
            .map(|line| Line::styled(line, theme.preview_style(classify_preview_line(line))))
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.model.is_ready() {
            self.render_loading(area, buf);
            return;
        }

        if area.height >= TITLE_ROWS {
            self.render_title(Rect { height: TITLE_ROWS, ..area }, buf);
        }

        if let Some(rects) = self.model.pane_rects() {
            if let Some(rect) = rects.editor {
                self.render_editor(rect.intersection(area), buf);
            }
            if let Some(rect) = rects.preview {
                self.render_preview(rect.intersection(area), buf);
            }
        }

        if area.height >= TITLE_ROWS + FOOTER_ROWS {
            let status_y = area.bottom() - FOOTER_ROWS;
            let row = |y: u16| Rect {
                y,
                height: 1,
                ..area
            };
            status::render_status_bar(self.model, self.theme, row(status_y), buf);
            status::render_help_bar(self.theme, row(status_y + 1), buf);
        }
    }
}

/// Columns needed for line numbers of a `total_lines` document.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

/// `text` without its first `columns` display columns.
fn skip_columns(text: &str, columns: usize) -> &str {
    let mut skipped = 0usize;
    for (idx, ch) in text.char_indices() {
        if skipped >= columns {
            return &text[idx..];
        }
        skipped += ch.width().unwrap_or(0);
    }
    if skipped >= columns { "" } else { text }
}
