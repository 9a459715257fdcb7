use crate::markdown::Renderer;
use crate::perf;

/// Result of [`RenderCache::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh<'a> {
    /// True only when the renderer ran and produced new output.
    pub changed: bool,
    pub output: &'a str,
}

/// Last successful render, keyed by the source text.
///
/// A failed render leaves the previous pair in place, so the preview shows
/// stale but valid output instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderCache {
    source: String,
    output: String,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Bring the cache up to date with `text`.
    ///
    /// The renderer is only called when `text` differs from the cached
    /// source.
    pub fn refresh(&mut self, renderer: &dyn Renderer, text: &str) -> Refresh<'_> {
        if text == self.source {
            return Refresh {
                changed: false,
                output: &self.output,
            };
        }

        let rendered = {
            let _scope = perf::scope("preview.render");
            renderer.render(text)
        };

        match rendered {
            Ok(output) => {
                text.clone_into(&mut self.source);
                self.output = normalize_blank_lines(&output);
                Refresh {
                    changed: true,
                    output: &self.output,
                }
            }
            Err(err) => {
                tracing::debug!(%err, "render failed, keeping previous preview");
                Refresh {
                    changed: false,
                    output: &self.output,
                }
            }
        }
    }
}

/// Collapse runs of blank lines down to a single blank line.
pub fn normalize_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(ch);
            }
        } else {
            newlines = 0;
            out.push(ch);
        }
    }
    out
}
