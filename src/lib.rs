// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. clipboard::ClipboardOp)
    clippy::module_name_repetitions
)]

//! # screenmd
//!
//! A split-pane terminal markdown editor with live preview.
//!
//! The editor pane holds raw markdown; the preview pane shows it rendered
//! to styled terminal text and follows every edit. Tab moves the keyboard
//! between the two panes, and the clipboard keys work on whole lines.
//!
//! ## Architecture
//!
//! screenmd uses The Elm Architecture (TEA) pattern:
//! - **Model**: Session state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Session state, focus, and the event loop
//! - [`editor`]: The editable document and its line helpers
//! - [`clipboard`]: System clipboard access and line copy/cut/paste
//! - [`markdown`]: Markdown to terminal text
//! - [`preview`]: Render caching
//! - [`ui`]: Layout, scrolling, theming, and drawing
//! - [`config`]: Saved startup flags
//! - [`logging`]: Tracing subscriber setup

pub mod app;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod logging;
pub mod markdown;
pub mod perf;
pub mod preview;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::focus::{FocusController, Pane, SplitMode};
    pub use crate::app::{App, EditorSession, Message, Model};
    pub use crate::editor::Document;
    pub use crate::markdown::{MarkdownRenderer, Renderer};
    pub use crate::ui::viewport::Viewport;
}
