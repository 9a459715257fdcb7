//! Scroll position of a pane.
//!
//! Both panes scroll through a [`Viewport`]: the preview moves it directly
//! from scroll keys, the editor drags it along with the cursor.

use std::ops::Range;

/// The visible window onto a list of lines.
///
/// # Example
///
/// ```
/// use screenmd::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(20, 100);
/// assert_eq!(vp.visible_range(), 0..20);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..30);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// Create a viewport `height` rows tall over `total_lines` lines.
    pub const fn new(height: u16, total_lines: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_lines,
        }
    }

    /// First visible line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Lines currently on screen, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_lines);
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    /// Scroll position as a percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        // offset <= max_offset, so the quotient is at most 100
        #[allow(clippy::cast_possible_truncation)]
        {
            ((self.offset * 100 + max_offset / 2) / max_offset) as u8
        }
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the minimum amount needed for `line` to be on screen.
    pub fn ensure_visible(&mut self, line: usize) {
        let height = self.height as usize;
        if height == 0 || line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
    }

    /// Change the number of rows, keeping the offset valid.
    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content length, keeping the offset valid.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(10, 50);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..10);
    }

    #[test]
    fn test_visible_range_with_short_content() {
        let vp = Viewport::new(10, 4);
        assert_eq!(vp.visible_range(), 0..4);
    }

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut vp = Viewport::new(10, 50);
        vp.scroll_down(1000);
        assert_eq!(vp.offset(), 40);
        assert!(!vp.can_scroll_down());
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let mut vp = Viewport::new(10, 50);
        vp.scroll_down(5);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
        assert!(!vp.can_scroll_up());
    }

    #[test]
    fn test_paging() {
        let mut vp = Viewport::new(10, 50);
        vp.page_down();
        assert_eq!(vp.offset(), 10);
        vp.page_down();
        vp.page_up();
        assert_eq!(vp.offset(), 10);
    }

    #[test]
    fn test_top_and_bottom() {
        let mut vp = Viewport::new(10, 50);
        vp.go_to_bottom();
        assert_eq!(vp.visible_range(), 40..50);
        assert_eq!(vp.scroll_percent(), 100);
        vp.go_to_top();
        assert_eq!(vp.scroll_percent(), 0);
    }

    #[test]
    fn test_scroll_percent_when_everything_fits() {
        assert_eq!(Viewport::new(10, 3).scroll_percent(), 100);
        assert_eq!(Viewport::new(10, 0).scroll_percent(), 100);
    }

    #[test]
    fn test_ensure_visible_scrolls_down_minimally() {
        let mut vp = Viewport::new(5, 50);
        vp.ensure_visible(7);
        assert_eq!(vp.offset(), 3);
        vp.ensure_visible(5);
        assert_eq!(vp.offset(), 3);
    }

    #[test]
    fn test_ensure_visible_scrolls_up() {
        let mut vp = Viewport::new(5, 50);
        vp.scroll_down(20);
        vp.ensure_visible(2);
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn test_ensure_visible_with_zero_height() {
        let mut vp = Viewport::new(0, 50);
        vp.ensure_visible(9);
        assert_eq!(vp.offset(), 9);
    }

    #[test]
    fn test_set_height_keeps_valid_offset() {
        let mut vp = Viewport::new(10, 50);
        vp.go_to_bottom();
        vp.set_height(30);
        assert_eq!(vp.offset(), 20);
    }

    #[test]
    fn test_set_total_lines_adjusts_offset() {
        let mut vp = Viewport::new(10, 50);
        vp.go_to_bottom();
        vp.set_total_lines(15);
        assert_eq!(vp.offset(), 5);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scroll_never_exceeds_bounds(
                total_lines in 0..10000usize,
                height in 1..100u16,
                amount in 0..10000usize,
            ) {
                let mut vp = Viewport::new(height, total_lines);
                vp.scroll_down(amount);
                prop_assert!(vp.offset() <= total_lines.saturating_sub(height as usize));
                let range = vp.visible_range();
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= total_lines);
                prop_assert!(vp.scroll_percent() <= 100);
            }

            #[test]
            fn ensured_line_is_visible(
                height in 1..100u16,
                start in 0..1000usize,
                line in 0..1000usize,
            ) {
                let mut vp = Viewport::new(height, 2000);
                vp.scroll_down(start);
                vp.ensure_visible(line);
                prop_assert!(vp.offset() <= line);
                prop_assert!(line < vp.offset() + height as usize);
            }
        }
    }
}
