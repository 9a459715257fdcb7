//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Pane geometry for each split mode
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors

pub mod layout;
pub mod style;
pub mod viewport;

mod render;
mod status;

pub use render::{TITLE, frame_text, line_number_width, render};
pub use status::{HELP_KEYS, status_text};
