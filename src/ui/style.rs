//! Colors and styles.
//!
//! A [`Theme`] is built once at startup from the configured
//! [`ThemeMode`] and handed to the renderer; nothing here is global.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Dot spinner shown while waiting for the terminal size.
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Base colors as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    primary: u32,
    secondary: u32,
    accent: u32,
    text: u32,
    subtle: u32,
    error: u32,
    help_bg: u32,
    cursor_line: u32,
}

const DARK: Palette = Palette {
    primary: 0x7D_56F4,
    secondary: 0x43_BF6D,
    accent: 0xF2_5D94,
    text: 0xFF_FFFF,
    subtle: 0x38_3838,
    error: 0xFF_5F87,
    help_bg: 0x2A_2A2A,
    cursor_line: 0x30_3030,
};

const LIGHT: Palette = Palette {
    primary: 0x87_4BFD,
    secondary: 0x43_BF6D,
    accent: 0xF2_5D94,
    text: 0x1F_1F1F,
    subtle: 0xD9_DCCF,
    error: 0xD7_0040,
    help_bg: 0xEE_EEEE,
    cursor_line: 0xE4_E4E4,
};

/// What a line of rendered preview text is, judged from its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewLine {
    Heading(u8),
    Code,
    Quote,
    Table,
    Rule,
    ListItem,
    Image,
    Text,
    Empty,
}

/// Classify a line produced by [`crate::markdown::MarkdownRenderer`].
pub fn classify_preview_line(line: &str) -> PreviewLine {
    if line.trim().is_empty() {
        return PreviewLine::Empty;
    }

    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        // at most 6
        #[allow(clippy::cast_possible_truncation)]
        return PreviewLine::Heading(hashes as u8);
    }

    if ["  ╭", "  │", "  ╰"].iter().any(|p| line.starts_with(p)) {
        return PreviewLine::Code;
    }
    if line.starts_with("  ▌") {
        return PreviewLine::Quote;
    }
    if line.starts_with(['┌', '│', '├', '└']) {
        return PreviewLine::Table;
    }
    if line.chars().all(|c| c == '─') {
        return PreviewLine::Rule;
    }
    if line.starts_with("Image: ") {
        return PreviewLine::Image;
    }

    let body = line.trim_start();
    if body.starts_with("• ") || body.starts_with("✓ ") || body.starts_with("□ ") {
        return PreviewLine::ListItem;
    }
    let digits = body.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && (body[digits..].starts_with(". ") || body[digits..].starts_with(") ")) {
        return PreviewLine::ListItem;
    }

    PreviewLine::Text
}

/// Every style the UI draws with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub title: Style,
    /// Border of the focused editor pane
    pub editor_border: Style,
    /// Border of the focused preview pane
    pub preview_border: Style,
    /// Border of an unfocused pane
    pub inactive_border: Style,
    pub status: Style,
    /// Status line after a failed clipboard operation
    pub status_error: Style,
    pub help: Style,
    pub help_key: Style,
    pub loading: Style,
    pub line_number: Style,
    pub cursor_line: Style,
    pub cursor: Style,
    pub placeholder: Style,
    pub h1: Style,
    pub h2: Style,
    pub h3: Style,
    /// Heading level 4+
    pub h4: Style,
    pub code: Style,
    pub quote: Style,
    pub table: Style,
    pub rule: Style,
    pub list: Style,
    pub image: Style,
    pub text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeMode::Dark, true)
    }
}

impl Theme {
    /// Theme for `mode`, using 24-bit colors only if the terminal says it
    /// supports them.
    pub fn detect(mode: ThemeMode) -> Self {
        Self::new(mode, supports_truecolor())
    }

    pub fn new(mode: ThemeMode, truecolor: bool) -> Self {
        let palette = match mode {
            ThemeMode::Dark => DARK,
            ThemeMode::Light => LIGHT,
        };
        let c = |hex: u32| color(hex, truecolor);
        let fg = |hex: u32| Style::default().fg(c(hex));

        Self {
            mode,
            title: fg(palette.primary).add_modifier(Modifier::BOLD),
            editor_border: fg(palette.primary),
            preview_border: fg(palette.secondary),
            inactive_border: fg(palette.subtle),
            status: fg(palette.text).bg(c(palette.subtle)),
            status_error: fg(palette.error).bg(c(palette.subtle)),
            help: fg(palette.subtle).bg(c(palette.help_bg)),
            help_key: fg(palette.primary)
                .bg(c(palette.help_bg))
                .add_modifier(Modifier::BOLD),
            loading: fg(palette.primary).add_modifier(Modifier::BOLD),
            line_number: fg(palette.subtle),
            cursor_line: Style::default().bg(c(palette.cursor_line)),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            placeholder: fg(palette.subtle).add_modifier(Modifier::ITALIC),
            h1: fg(palette.primary).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: fg(palette.secondary).add_modifier(Modifier::BOLD),
            h3: fg(palette.accent).add_modifier(Modifier::BOLD),
            h4: fg(palette.text).add_modifier(Modifier::BOLD),
            code: fg(palette.subtle).add_modifier(Modifier::DIM),
            quote: fg(palette.secondary).add_modifier(Modifier::ITALIC),
            table: fg(palette.text),
            rule: fg(palette.subtle),
            list: fg(palette.text),
            image: fg(palette.accent).add_modifier(Modifier::ITALIC),
            text: fg(palette.text),
        }
    }

    /// Style for one preview line.
    pub const fn preview_style(&self, kind: PreviewLine) -> Style {
        match kind {
            PreviewLine::Heading(1) => self.h1,
            PreviewLine::Heading(2) => self.h2,
            PreviewLine::Heading(3) => self.h3,
            PreviewLine::Heading(_) => self.h4,
            PreviewLine::Code => self.code,
            PreviewLine::Quote => self.quote,
            PreviewLine::Table => self.table,
            PreviewLine::Rule => self.rule,
            PreviewLine::ListItem => self.list,
            PreviewLine::Image => self.image,
            PreviewLine::Text | PreviewLine::Empty => self.text,
        }
    }
}

fn color(hex: u32, truecolor: bool) -> Color {
    // masked to one byte each
    #[allow(clippy::cast_possible_truncation)]
    let (r, g, b) = ((hex >> 16) as u8, (hex >> 8) as u8, hex as u8);
    if truecolor {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(rgb_to_xterm_256(r, g, b))
    }
}

fn supports_truecolor() -> bool {
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    if let Some(t) = term {
        let lower = t.to_ascii_lowercase();
        if lower.contains("direct") || lower.contains("truecolor") {
            return true;
        }
    }
    false
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}
