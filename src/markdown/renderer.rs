//! Markdown rendering with comrak.

use std::fmt::Write as _;

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{RenderError, Renderer};

/// Column at which preview paragraphs wrap unless configured otherwise.
pub const DEFAULT_WRAP_WIDTH: usize = 80;

const MIN_WRAP_WIDTH: usize = 20;
const QUOTE_PREFIX: &str = "  ▌ ";
const CODE_INDENT: &str = "  ";

/// Renders markdown into plain terminal text.
///
/// Block structure is kept visible in the text itself: headings keep their
/// `#` markers, code blocks are framed with rounded corners, tables with
/// square ones, and quotes carry a `▌` gutter. The preview pane styles lines
/// from those markers.
///
/// # Example
///
/// ```
/// use screenmd::markdown::{MarkdownRenderer, Renderer};
///
/// let text = MarkdownRenderer::default().render("# Hello\n\nWorld").unwrap();
/// assert_eq!(text, "# Hello\n\nWorld");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownRenderer {
    wrap_width: usize,
}

impl MarkdownRenderer {
    /// Create a renderer that wraps at `wrap_width` columns.
    pub const fn new(wrap_width: usize) -> Self {
        Self {
            wrap_width: if wrap_width < MIN_WRAP_WIDTH {
                MIN_WRAP_WIDTH
            } else {
                wrap_width
            },
        }
    }

    pub const fn wrap_width(&self) -> usize {
        self.wrap_width
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH)
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let mut options = Options::default();

        // GFM extensions
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        // :emoji: shortcodes
        options.extension.shortcodes = true;

        let root = parse_document(&arena, markdown, &options);
        let mut out = Output::new(self.wrap_width);
        out.block(root, 0, None)?;
        Ok(out.finish())
    }
}

struct Output {
    lines: Vec<String>,
    width: usize,
}

impl Output {
    const fn new(width: usize) -> Self {
        Self {
            lines: Vec::new(),
            width,
        }
    }

    fn finish(mut self) -> String {
        while self.lines.last().is_some_and(String::is_empty) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }

    /// Separate the next block with one empty line, except at the top.
    fn separate(&mut self) {
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn push_wrapped(&mut self, text: &str, prefix_first: &str, prefix_next: &str) {
        self.lines
            .extend(wrap_text(text, self.width, prefix_first, prefix_next));
    }

    fn block<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        depth: usize,
        list_marker: Option<&str>,
    ) -> Result<(), RenderError> {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                self.separate();
                let text = inline_text(node);
                let prefix = "#".repeat(usize::from(heading.level));
                self.lines.push(format!("{prefix} {}", text.replace('\n', " ")));
                self.lines.push(String::new());
            }

            NodeValue::Paragraph => {
                self.push_wrapped(&inline_text(node), "", "");
                self.lines.push(String::new());
            }

            NodeValue::CodeBlock(code_block) => {
                self.separate();
                let language = code_block.info.split_whitespace().next().unwrap_or("code");
                self.code_block(language, &code_block.literal)?;
                self.lines.push(String::new());
            }

            NodeValue::List(list) => {
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                let count = node.children().count();
                let number_width = (list.start + count.saturating_sub(1)).to_string().len();

                for (index, child) in node.children().enumerate() {
                    let marker = match list.list_type {
                        ListType::Bullet => "• ".to_string(),
                        ListType::Ordered => format!(
                            "{:>number_width$}{delimiter} ",
                            list.start + index
                        ),
                    };
                    self.block(child, depth + 1, Some(&marker))?;
                }
                if depth == 0 {
                    self.lines.push(String::new());
                }
            }

            NodeValue::Item(_) | NodeValue::TaskItem(_) => {
                let indent = "  ".repeat(depth.saturating_sub(1));
                let marker = match &node.data.borrow().value {
                    NodeValue::TaskItem(Some(_)) => "✓ ".to_string(),
                    NodeValue::TaskItem(None) => "□ ".to_string(),
                    _ => list_marker.unwrap_or("• ").to_string(),
                };
                let prefix_first = format!("{indent}{marker}");
                let prefix_next = format!("{indent}{}", " ".repeat(marker.width()));
                let mut rendered_any = false;

                for child in node.children() {
                    if matches!(child.data.borrow().value, NodeValue::Paragraph) {
                        let prefix = if rendered_any {
                            &prefix_next
                        } else {
                            &prefix_first
                        };
                        self.push_wrapped(&inline_text(child), prefix, &prefix_next);
                        rendered_any = true;
                    } else {
                        self.block(child, depth, None)?;
                    }
                }
                if !rendered_any {
                    self.lines.push(prefix_first.trim_end().to_string());
                }
            }

            NodeValue::BlockQuote => {
                self.separate();
                let mut inner = Self::new(self.width.saturating_sub(QUOTE_PREFIX.width()).max(1));
                for child in node.children() {
                    inner.block(child, 0, None)?;
                }
                for line in inner.finish().split('\n') {
                    self.lines
                        .push(format!("{QUOTE_PREFIX}{line}").trim_end().to_string());
                }
                self.lines.push(String::new());
            }

            NodeValue::ThematicBreak => {
                self.separate();
                self.lines.push("─".repeat(self.width.min(40)));
                self.lines.push(String::new());
            }

            NodeValue::Table(_) => {
                self.separate();
                let rendered = render_table(node, self.width)?;
                self.lines.extend(rendered);
                self.lines.push(String::new());
            }

            NodeValue::FootnoteDefinition(def) => {
                let label = format!("[^{}]: ", def.name);
                let continuation = " ".repeat(label.width());
                self.push_wrapped(&inline_text(node), &label, &continuation);
                self.lines.push(String::new());
            }

            NodeValue::HtmlBlock(html) => {
                self.lines
                    .extend(html.literal.lines().map(|line| line.trim_end().to_string()));
                self.lines.push(String::new());
            }

            _ => {
                for child in node.children() {
                    self.block(child, depth, list_marker)?;
                }
            }
        }
        Ok(())
    }

    fn code_block(&mut self, language: &str, literal: &str) -> Result<(), RenderError> {
        let raw_lines: Vec<String> = literal
            .lines()
            .map(|line| line.replace('\t', "    "))
            .collect();
        let max_content = self.width.saturating_sub(CODE_INDENT.len() + 4).max(1);
        let content_width = raw_lines
            .iter()
            .map(|line| display_width(line))
            .max()
            .unwrap_or(0)
            .max(language.width() + 2)
            .min(max_content);
        let inner_width = content_width + 2;

        let label = truncate_text(&format!("─ {language} "), inner_width);
        let mut top = String::new();
        write!(
            top,
            "{CODE_INDENT}╭{label}{}╮",
            "─".repeat(inner_width.saturating_sub(display_width(&label)))
        )?;
        self.lines.push(top);

        for raw_line in &raw_lines {
            let visible = truncate_text(raw_line, content_width);
            let padding = content_width.saturating_sub(display_width(&visible));
            let mut line = String::new();
            write!(line, "{CODE_INDENT}│ {visible}{} │", " ".repeat(padding))?;
            self.lines.push(line);
        }

        self.lines
            .push(format!("{CODE_INDENT}╰{}╯", "─".repeat(inner_width)));
        Ok(())
    }
}

fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    inline_text_recursive(node, &mut text);
    text
}

fn inline_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        // Nested lists are rendered as their own blocks.
        NodeValue::List(_) | NodeValue::Item(_) => {}
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(code) => text.push_str(&code.literal),
        NodeValue::HtmlInline(html) => text.push_str(html),
        NodeValue::ShortCode(short) => text.push_str(&short.emoji),
        NodeValue::SoftBreak => text.push(' '),
        NodeValue::LineBreak => text.push('\n'),
        NodeValue::FootnoteReference(reference) => {
            text.push_str(&format!("[^{}]", reference.name));
        }
        NodeValue::Link(link) => {
            let mut label = String::new();
            for child in node.children() {
                inline_text_recursive(child, &mut label);
            }
            let is_autolink = label == link.url
                || link.url.strip_prefix("mailto:") == Some(label.as_str());
            text.push_str(&label);
            if !is_autolink && !link.url.is_empty() {
                text.push_str(&format!(" ({})", link.url));
            }
        }
        NodeValue::Image(image) => {
            let mut alt = String::new();
            for child in node.children() {
                inline_text_recursive(child, &mut alt);
            }
            if alt.is_empty() {
                text.push_str(&format!("Image: {}", image.url));
            } else {
                text.push_str(&format!("Image: {alt} → {}", image.url));
            }
        }
        _ => {
            for child in node.children() {
                inline_text_recursive(child, text);
            }
        }
    }
}

/// Word-wrap `text` to `width` display columns.
///
/// Explicit `'\n'` in the text forces a break. Words longer than the width
/// are left intact on their own line.
fn wrap_text(text: &str, width: usize, prefix_first: &str, prefix_next: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = prefix_first.to_string();
    let mut current_width = prefix_first.width();
    let mut has_word = false;

    for (idx, segment) in text.split('\n').enumerate() {
        if idx > 0 {
            lines.push(current.trim_end().to_string());
            current = prefix_next.to_string();
            current_width = prefix_next.width();
            has_word = false;
        }
        for token in split_tokens(segment) {
            let token_width = token.width();
            let is_ws = token.chars().all(char::is_whitespace);

            if is_ws && !has_word {
                // Drop leading whitespace at line starts.
                continue;
            }
            if !is_ws && has_word && current_width + token_width > width {
                lines.push(current.trim_end().to_string());
                current = prefix_next.to_string();
                current_width = prefix_next.width();
            }
            current.push_str(token);
            current_width += token_width;
            has_word = true;
        }
    }

    lines.push(current.trim_end().to_string());
    lines
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0usize;
    let mut ws_state: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        match ws_state {
            Some(state) if state != is_ws => {
                tokens.push(&text[start..idx]);
                start = idx;
                ws_state = Some(is_ws);
            }
            Some(_) => {}
            None => ws_state = Some(is_ws),
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

fn render_table<'a>(
    table_node: &'a AstNode<'a>,
    wrap_width: usize,
) -> Result<Vec<String>, RenderError> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Ok(Vec::new());
    }

    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(display_width(cell));
        }
    }

    // Table row width is: 1 + sum(col_width + 3) for all columns.
    let max_table_width = wrap_width.max(4);
    while 1 + col_widths.iter().sum::<usize>() + (3 * num_cols) > max_table_width {
        let Some((widest_idx, widest)) = col_widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
        else {
            break;
        };
        if widest <= 1 {
            break;
        }
        col_widths[widest_idx] -= 1;
    }

    let mid = render_table_border(&col_widths, '├', '┼', '┤');
    let mut lines = vec![render_table_border(&col_widths, '┌', '┬', '┐')];
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_table_row(row, &col_widths, &alignments)?);
        if has_header && idx == 0 {
            lines.push(mid.clone());
        }
    }
    lines.push(render_table_border(&col_widths, '└', '┴', '┘'));
    Ok(lines)
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        let NodeValue::TableRow(is_header) = row_node.data.borrow().value else {
            continue;
        };
        has_header |= is_header;

        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                inline_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }

    (alignments, rows, has_header)
}

fn render_table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let inner = widths
        .iter()
        .map(|width| "─".repeat(width + 2))
        .collect::<Vec<_>>()
        .join(&middle.to_string());
    format!("{left}{inner}{right}")
}

fn render_table_row(
    cells: &[String],
    widths: &[usize],
    alignments: &[TableAlignment],
) -> Result<String, RenderError> {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().copied().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), width);
        let padding = width.saturating_sub(display_width(&content));
        let (left, right) = match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => (padding, 0),
            TableAlignment::Center => (padding / 2, padding - padding / 2),
            TableAlignment::Left | TableAlignment::None => (0, padding),
        };
        write!(
            out,
            " {}{content}{} │",
            " ".repeat(left),
            " ".repeat(right)
        )?;
    }
    Ok(out)
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}
