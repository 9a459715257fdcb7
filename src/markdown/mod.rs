//! Markdown to terminal text.
//!
//! The session only knows the [`Renderer`] trait; [`MarkdownRenderer`] is
//! the comrak-backed implementation the application ships with.

mod renderer;

pub use renderer::{DEFAULT_WRAP_WIDTH, MarkdownRenderer};

use thiserror::Error;

/// Failure producing preview text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Failed(String),
}

impl From<std::fmt::Error> for RenderError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Failed(err.to_string())
    }
}

/// Converts markdown source into display text.
///
/// Implementations must be deterministic for a given configuration: the
/// preview cache relies on equal input producing equal output.
pub trait Renderer {
    /// Render `markdown` to text lines joined by `'\n'`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Failed`] when the text cannot be produced.
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}
