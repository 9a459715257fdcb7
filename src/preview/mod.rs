//! Rendered preview state.

mod cache;

pub use cache::{Refresh, RenderCache, normalize_blank_lines};
