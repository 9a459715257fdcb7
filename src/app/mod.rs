//! Session state and the main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete session state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`EditorSession`]: applies `update`, then clipboard and preview effects
//! - [`App::run`]: terminal setup and the event loop

pub mod focus;

mod event_loop;
mod input;
mod model;
mod session;
mod update;

pub use input::{handle_event, handle_key, handle_mouse};
pub use model::{Model, WELCOME_TEXT};
pub use session::EditorSession;
pub use update::{Message, update};

use crate::clipboard::{Clipboard, ClipboardBridge, MemoryClipboard, SystemClipboard};
use crate::config::ThemeMode;
use crate::editor::Document;
use crate::markdown::{DEFAULT_WRAP_WIDTH, MarkdownRenderer};
use focus::{FocusController, SplitMode};

/// Startup options; owns nothing until [`App::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    split_mode: SplitMode,
    fullscreen_switch: bool,
    wrap_width: usize,
    theme_mode: ThemeMode,
    line_numbers: bool,
    internal_clipboard: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub const fn new() -> Self {
        Self {
            split_mode: SplitMode::SideBySide,
            fullscreen_switch: false,
            wrap_width: DEFAULT_WRAP_WIDTH,
            theme_mode: ThemeMode::Dark,
            line_numbers: true,
            internal_clipboard: false,
        }
    }

    /// Initial pane arrangement.
    #[must_use]
    pub const fn with_split_mode(mut self, mode: SplitMode) -> Self {
        self.split_mode = mode;
        self
    }

    /// Toggle fullscreen together with focus.
    #[must_use]
    pub const fn with_fullscreen_switch(mut self, enabled: bool) -> Self {
        self.fullscreen_switch = enabled;
        self
    }

    /// Preview word-wrap width.
    #[must_use]
    pub const fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, mode: ThemeMode) -> Self {
        self.theme_mode = mode;
        self
    }

    #[must_use]
    pub const fn with_line_numbers(mut self, show: bool) -> Self {
        self.line_numbers = show;
        self
    }

    /// Keep copied text inside the process instead of the OS clipboard.
    #[must_use]
    pub const fn with_internal_clipboard(mut self, enabled: bool) -> Self {
        self.internal_clipboard = enabled;
        self
    }

    /// A fresh session on the welcome document, wired to the configured
    /// clipboard and renderer.
    pub fn session(&self) -> EditorSession {
        let focus = FocusController::new(self.split_mode, self.fullscreen_switch);
        let model = Model::new(Document::from_text(WELCOME_TEXT), focus)
            .with_line_numbers(self.line_numbers);
        let clipboard: Box<dyn Clipboard> = if self.internal_clipboard {
            Box::new(MemoryClipboard::new())
        } else {
            Box::new(SystemClipboard::new())
        };
        EditorSession::new(
            model,
            ClipboardBridge::new(clipboard),
            Box::new(MarkdownRenderer::new(self.wrap_width)),
        )
    }
}

#[cfg(test)]
mod tests;
