use crate::app::focus::{FocusController, Pane};
use crate::clipboard::ClipboardState;
use crate::editor::Document;
use crate::preview::RenderCache;
use crate::ui::layout::{self, LayoutMetrics, PaneRects};
use crate::ui::viewport::Viewport;

/// Document shown when the editor starts.
pub const WELCOME_TEXT: &str = r#"# Welcome to My Markdown Document

This is a **dummy markdown file** created to showcase the use of Markdown formatting in a document. Markdown is a lightweight markup language often used for README files, documentation, and content writing.

---

## Introduction

Markdown allows you to write text that is:
- **Easy to read**
- **Quick to write**
- **Portable across platforms**

It is widely used in platforms like **GitHub**, **Notion**, and **Visual Studio Code**.

---

## Key Features

### 1. Text Formatting
- *Italic*: _This text is italicized._
- **Bold**: __This text is bolded.__
- ~~Strikethrough~~: This text is crossed out.

### 2. Lists
- **Ordered Lists**:
  1. Item one
  2. Item two
  3. Item three

- **Unordered Lists**:
  - Item A
  - Item B
  - Item C

### 3. Links and Images
- **Hyperlinks**: [Markdown Guide](https://www.markdownguide.org)
- **Images**:
![Markdown Logo](https://upload.wikimedia.org/wikipedia/commons/4/48/Markdown-mark.svg)

---

Markdown also supports code blocks:
```go
func main() {
    fmt.Println("Hello!")
}
```

## Tables in Markdown
| **Name**      | **Age** | **Occupation**       | **Country**  |
|---------------|---------|----------------------|--------------|
| Tejas Mahajan | 20      | Student, CSE         | India        |
| John Doe      | 25      | Software Developer   | USA          |
| Jane Smith    | 28      | Data Scientist       | UK           |
| Ali Khan      | 22      | Cybersecurity Expert | Pakistan     |
"#;

/// The complete session state.
///
/// All state lives here; [`crate::app::update`] is the only place it changes
/// in response to input, apart from the clipboard and preview side effects
/// applied by [`crate::app::EditorSession`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    /// The markdown being edited
    pub document: Document,
    /// Outcome of the last clipboard action, for the status line
    pub clipboard: ClipboardState,
    pub focus: FocusController,
    /// Pane geometry; `None` until the first resize
    pub layout: Option<LayoutMetrics>,
    /// Last reported terminal size
    pub terminal_size: (u16, u16),
    /// Keeps the cursor line on screen
    pub editor_viewport: Viewport,
    /// Scroll position of the rendered preview
    pub preview_viewport: Viewport,
    /// Text currently displayed in the preview pane
    pub preview_text: String,
    pub cache: RenderCache,
    pub show_line_numbers: bool,
    /// Loading animation frame
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl Model {
    /// Create a model for `document`. The cursor starts at the top.
    pub fn new(document: Document, focus: FocusController) -> Self {
        let mut model = Self {
            document,
            focus,
            show_line_numbers: true,
            ..Self::default()
        };
        model.sync_editor_viewport();
        model
    }

    #[must_use]
    pub const fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    /// True once the terminal size is known.
    pub const fn is_ready(&self) -> bool {
        self.layout.is_some()
    }

    pub const fn active_pane(&self) -> Pane {
        self.focus.active_pane()
    }

    /// Outer rectangles of the visible panes, if the layout is known.
    pub fn pane_rects(&self) -> Option<PaneRects> {
        let metrics = self.layout?;
        Some(layout::pane_rects(
            &metrics,
            self.focus.split_mode(),
            self.focus.active_pane(),
        ))
    }

    /// Record a new terminal size and lay the panes out for it.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.apply_layout();
    }

    /// Recompute pane geometry after a split-mode or focus change.
    ///
    /// Does nothing before the first resize.
    pub fn reflow_layout(&mut self) {
        if self.is_ready() {
            self.apply_layout();
        }
    }

    fn apply_layout(&mut self) {
        let (width, height) = self.terminal_size;
        let metrics = layout::compute_layout(width, height, self.focus.split_mode());
        self.layout = Some(metrics);

        let rects = layout::pane_rects(&metrics, self.focus.split_mode(), self.active_pane());
        let height_of = |pane| {
            rects
                .get(pane)
                .map_or(metrics.pane_height, layout::content_height)
        };
        self.editor_viewport.set_height(height_of(Pane::Editor));
        self.preview_viewport.set_height(height_of(Pane::Preview));
        self.sync_editor_viewport();
    }

    /// Track document length and keep the cursor line visible.
    pub fn sync_editor_viewport(&mut self) {
        self.editor_viewport
            .set_total_lines(self.document.line_count());
        let (line, _) = self.document.cursor_position();
        self.editor_viewport.ensure_visible(line);
    }

    /// Replace the displayed preview.
    pub fn set_preview_text(&mut self, text: String) {
        self.preview_text = text;
        self.preview_viewport
            .set_total_lines(self.preview_text.lines().count());
    }

    /// Preview lines currently in view.
    pub fn visible_preview_lines(&self) -> impl Iterator<Item = &str> {
        let range = self.preview_viewport.visible_range();
        self.preview_text
            .lines()
            .skip(range.start)
            .take(range.end - range.start)
    }
}
