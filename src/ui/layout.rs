//! Pane geometry from terminal dimensions.

use ratatui::layout::Rect;

use crate::app::focus::{Pane, SplitMode};

/// Title bar rows.
pub const TITLE_ROWS: u16 = 1;
/// Status line, help line and a spacer.
pub const FOOTER_ROWS: u16 = 3;
/// Top and bottom pane borders.
pub const PANE_MARGIN_ROWS: u16 = 2;
/// Left and right border columns of the panes.
pub const HORIZONTAL_MARGIN: u16 = 4;

const RESERVED_ROWS: u16 = TITLE_ROWS + FOOTER_ROWS + PANE_MARGIN_ROWS;

/// Pane sizes for one terminal size and split mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub total_width: u16,
    pub total_height: u16,
    /// Content columns of each pane, borders excluded.
    pub pane_width: u16,
    /// Content rows, borders excluded.
    pub pane_height: u16,
    /// 1 or 2.
    pub pane_count: u16,
}

/// Compute pane geometry.
///
/// Never yields negative sizes: a terminal smaller than the reserved
/// chrome gives zero-sized panes.
///
/// ```
/// use screenmd::app::focus::SplitMode;
/// use screenmd::ui::layout::compute_layout;
///
/// let metrics = compute_layout(84, 30, SplitMode::SideBySide);
/// assert_eq!(metrics.pane_width, 40);
/// assert_eq!(metrics.pane_height, 24);
/// assert_eq!(metrics.pane_count, 2);
/// ```
pub const fn compute_layout(width: u16, height: u16, split_mode: SplitMode) -> LayoutMetrics {
    let usable = width.saturating_sub(HORIZONTAL_MARGIN);
    let (pane_width, pane_count) = match split_mode {
        SplitMode::SideBySide => (usable / 2, 2),
        SplitMode::Sequential | SplitMode::Fullscreen => (usable, 1),
    };
    LayoutMetrics {
        total_width: width,
        total_height: height,
        pane_width,
        pane_height: height.saturating_sub(RESERVED_ROWS),
        pane_count,
    }
}

/// Outer (bordered) rectangles of the visible panes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneRects {
    pub editor: Option<Rect>,
    pub preview: Option<Rect>,
}

impl PaneRects {
    pub const fn get(&self, pane: Pane) -> Option<Rect> {
        match pane {
            Pane::Editor => self.editor,
            Pane::Preview => self.preview,
        }
    }
}

/// Place the panes for `metrics`.
///
/// Side by side, the left pane is exactly `pane_width` wide inside its
/// borders and the right pane takes the remaining columns. Sequential mode
/// stacks the editor over the preview, splitting the rows between them.
pub fn pane_rects(metrics: &LayoutMetrics, split_mode: SplitMode, active: Pane) -> PaneRects {
    let y = TITLE_ROWS.min(metrics.total_height);
    let main_height = metrics
        .total_height
        .saturating_sub(TITLE_ROWS + FOOTER_ROWS);

    match split_mode {
        SplitMode::SideBySide => {
            let left_width = (metrics.pane_width + 2).min(metrics.total_width);
            let left = Rect::new(0, y, left_width, main_height);
            let right = Rect::new(
                left_width,
                y,
                metrics.total_width - left_width,
                main_height,
            );
            PaneRects {
                editor: Some(left),
                preview: Some(right),
            }
        }
        SplitMode::Sequential => {
            let column = centered_column(metrics);
            let top_height = main_height / 2;
            let top = Rect::new(column.x, y, column.width, top_height);
            let bottom = Rect::new(
                column.x,
                y + top_height,
                column.width,
                main_height - top_height,
            );
            PaneRects {
                editor: Some(top),
                preview: Some(bottom),
            }
        }
        SplitMode::Fullscreen => {
            let column = centered_column(metrics);
            let full = Rect::new(column.x, y, column.width, main_height);
            match active {
                Pane::Editor => PaneRects {
                    editor: Some(full),
                    preview: None,
                },
                Pane::Preview => PaneRects {
                    editor: None,
                    preview: Some(full),
                },
            }
        }
    }
}

/// Rows available for content inside a bordered pane.
pub const fn content_height(outer: Rect) -> u16 {
    outer.height.saturating_sub(PANE_MARGIN_ROWS)
}

/// Columns available for content inside a bordered pane.
pub const fn content_width(outer: Rect) -> u16 {
    outer.width.saturating_sub(2)
}

fn centered_column(metrics: &LayoutMetrics) -> Rect {
    let x = if metrics.total_width >= HORIZONTAL_MARGIN {
        1
    } else {
        0
    };
    let width = (metrics.pane_width + 2).min(metrics.total_width - x);
    Rect::new(x, 0, width, 0)
}
