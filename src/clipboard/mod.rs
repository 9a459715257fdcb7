//! Clipboard access and line-oriented copy/cut/paste.
//!
//! - [`Clipboard`]: the external clipboard, as a trait so the session can be
//!   driven without an OS clipboard
//! - [`SystemClipboard`]: `arboard` backed, with an OSC 52 fallback for writes
//! - [`ClipboardBridge`]: copy/cut/paste of the cursor line, recording the
//!   outcome in [`ClipboardState`]

mod bridge;

pub use bridge::{ClipboardBridge, ClipboardOp, ClipboardState};

use std::io::{Write, stdout};

use base64::Engine;
use thiserror::Error;

/// Failure talking to the clipboard. Always recoverable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<std::io::Error> for ClipboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// The external clipboard.
///
/// Implementations must not be assumed to be read-after-write consistent:
/// the user can change the OS clipboard between any two calls.
pub trait Clipboard {
    /// Replace the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::Unavailable`] when no clipboard can be reached.
    fn write_all(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Read the clipboard contents as text.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::Unavailable`] when no clipboard can be reached
    /// or it holds no text.
    fn read_all(&mut self) -> Result<String, ClipboardError>;
}

/// The operating system clipboard.
///
/// One `arboard` handle is opened at construction and kept for the life of
/// the session: on X11 and Wayland the process hosts the copied text, and
/// it disappears with the last handle. Without a handle, writes go out as
/// OSC 52 escapes and reads fail.
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let handle = match arboard::Clipboard::new() {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::debug!(%err, "system clipboard unavailable, writes use OSC 52");
                None
            }
        };
        Self { handle }
    }

    pub const fn is_connected(&self) -> bool {
        self.handle.is_some()
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl Clipboard for SystemClipboard {
    fn write_all(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(handle) = self.handle.as_mut() {
            match handle.set_text(text) {
                Ok(()) => return Ok(()),
                Err(err) => tracing::debug!(%err, "system clipboard write failed, using OSC 52"),
            }
        }
        write_osc52(&mut stdout(), text)
    }

    fn read_all(&mut self) -> Result<String, ClipboardError> {
        let handle = self.handle.as_mut().ok_or_else(|| {
            ClipboardError::Unavailable("no system clipboard".to_string())
        })?;
        Ok(handle.get_text()?)
    }
}

/// A process-local clipboard.
///
/// Used when the system clipboard should not be touched (for example over
/// SSH without clipboard forwarding).
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    pub const fn new() -> Self {
        Self { content: None }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_all(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.content = Some(text.to_string());
        Ok(())
    }

    fn read_all(&mut self) -> Result<String, ClipboardError> {
        self.content
            .clone()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard is empty".to_string()))
    }
}

fn write_osc52(out: &mut impl Write, text: &str) -> Result<(), ClipboardError> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()?;
    Ok(())
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
