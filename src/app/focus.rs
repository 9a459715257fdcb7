//! Which pane owns the keyboard, and how the panes are arranged.

use clap::ValueEnum;

/// One of the two panes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pane {
    #[default]
    Editor,
    Preview,
}

impl Pane {
    pub const fn other(self) -> Self {
        match self {
            Self::Editor => Self::Preview,
            Self::Preview => Self::Editor,
        }
    }

    /// Status-bar mode name.
    pub const fn mode_label(self) -> &'static str {
        match self {
            Self::Editor => "Editor Mode",
            Self::Preview => "Preview Mode",
        }
    }
}

/// Pane arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SplitMode {
    /// Editor left, preview right.
    #[default]
    SideBySide,
    /// Editor above preview.
    Sequential,
    /// Only the active pane.
    Fullscreen,
}

impl SplitMode {
    pub const fn next(self) -> Self {
        match self {
            Self::SideBySide => Self::Sequential,
            Self::Sequential => Self::Fullscreen,
            Self::Fullscreen => Self::SideBySide,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SideBySide => "side-by-side",
            Self::Sequential => "sequential",
            Self::Fullscreen => "fullscreen",
        }
    }
}

/// Whether the editing surface gained or lost the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTransition {
    Acquired,
    Released,
}

/// Active pane and split mode.
///
/// Exactly one pane is active. While the editor is active, keystrokes are
/// text edits; while the preview is active, they navigate the preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusController {
    active: Pane,
    split_mode: SplitMode,
    fullscreen_on_switch: bool,
}

impl FocusController {
    /// Start with the editor focused.
    ///
    /// With `fullscreen_on_switch`, every focus switch also flips between
    /// fullscreen and side-by-side.
    pub const fn new(split_mode: SplitMode, fullscreen_on_switch: bool) -> Self {
        Self {
            active: Pane::Editor,
            split_mode,
            fullscreen_on_switch,
        }
    }

    pub const fn active_pane(&self) -> Pane {
        self.active
    }

    pub const fn split_mode(&self) -> SplitMode {
        self.split_mode
    }

    pub const fn fullscreen_on_switch(&self) -> bool {
        self.fullscreen_on_switch
    }

    /// True while keystrokes should be treated as text edits.
    pub const fn editor_receptive(&self) -> bool {
        matches!(self.active, Pane::Editor)
    }

    /// Whether `pane` is drawn in the current split mode.
    pub fn is_visible(&self, pane: Pane) -> bool {
        self.split_mode != SplitMode::Fullscreen || pane == self.active
    }

    pub fn switch_focus(&mut self) -> FocusTransition {
        self.active = self.active.other();
        if self.fullscreen_on_switch {
            self.split_mode = match self.split_mode {
                SplitMode::Fullscreen => SplitMode::SideBySide,
                SplitMode::SideBySide | SplitMode::Sequential => SplitMode::Fullscreen,
            };
        }
        match self.active {
            Pane::Editor => FocusTransition::Acquired,
            Pane::Preview => FocusTransition::Released,
        }
    }

    /// Advance to the next split mode and return it.
    pub fn cycle_split_mode(&mut self) -> SplitMode {
        self.split_mode = self.split_mode.next();
        self.split_mode
    }
}
