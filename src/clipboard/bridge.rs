use crate::editor::{Document, delete_line};

use super::{Clipboard, ClipboardError};

/// Outcome of the most recent clipboard action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClipboardOp {
    #[default]
    None,
    Copied,
    Cut,
    Pasted,
    CopyFailed,
    CutFailed,
    PasteFailed,
}

impl ClipboardOp {
    /// Short status-bar label, `None` when nothing happened yet.
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Copied => Some("Copied"),
            Self::Cut => Some("Cut"),
            Self::Pasted => Some("Pasted"),
            Self::CopyFailed => Some("Copy failed"),
            Self::CutFailed => Some("Cut failed"),
            Self::PasteFailed => Some("Paste failed"),
        }
    }

    pub const fn is_failure(self) -> bool {
        matches!(self, Self::CopyFailed | Self::CutFailed | Self::PasteFailed)
    }
}

/// What the status bar knows about the clipboard. Display only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardState {
    /// The line most recently copied or cut by this session.
    pub last_selection: String,
    pub last_operation: ClipboardOp,
}

/// Line-granular copy, cut and paste on top of a [`Clipboard`].
pub struct ClipboardBridge {
    clipboard: Box<dyn Clipboard>,
}

impl ClipboardBridge {
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self {
        Self { clipboard }
    }

    /// Copy the cursor line to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns the clipboard error; `state` records `CopyFailed` and keeps
    /// its previous selection.
    pub fn copy_line(
        &mut self,
        document: &Document,
        state: &mut ClipboardState,
    ) -> Result<(), ClipboardError> {
        let line = document.current_line();
        match self.clipboard.write_all(line) {
            Ok(()) => {
                line.clone_into(&mut state.last_selection);
                state.last_operation = ClipboardOp::Copied;
                Ok(())
            }
            Err(err) => {
                state.last_operation = ClipboardOp::CopyFailed;
                Err(err)
            }
        }
    }

    /// Insert the clipboard contents at the cursor.
    ///
    /// # Errors
    ///
    /// Returns the clipboard error; the document is left untouched and
    /// `state` records `PasteFailed`.
    pub fn paste_at_cursor(
        &mut self,
        document: &mut Document,
        state: &mut ClipboardState,
    ) -> Result<(), ClipboardError> {
        match self.clipboard.read_all() {
            Ok(text) => {
                document.insert_at(&text);
                state.last_operation = ClipboardOp::Pasted;
                Ok(())
            }
            Err(err) => {
                state.last_operation = ClipboardOp::PasteFailed;
                Err(err)
            }
        }
    }

    /// Copy the cursor line, then remove it from the document.
    ///
    /// The line is removed only after the copy succeeded. Removal goes
    /// through [`delete_line`], so an identical line earlier in the text is
    /// the one that disappears.
    ///
    /// # Errors
    ///
    /// Returns the clipboard error; the document is left untouched and
    /// `state` records `CutFailed`.
    pub fn cut_line(
        &mut self,
        document: &mut Document,
        state: &mut ClipboardState,
    ) -> Result<(), ClipboardError> {
        let line = document.current_line().to_string();
        if let Err(err) = self.clipboard.write_all(&line) {
            state.last_operation = ClipboardOp::CutFailed;
            return Err(err);
        }
        let remaining = delete_line(document.text(), &line);
        document.set_value(&remaining);
        state.last_selection = line;
        state.last_operation = ClipboardOp::Cut;
        Ok(())
    }
}

impl std::fmt::Debug for ClipboardBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardBridge").finish_non_exhaustive()
    }
}
