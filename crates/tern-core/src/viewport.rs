//! The window of document lines currently on screen.
//!
//! The viewport is a half-open range `[page_start, page_end)` whose height is
//! fixed when the session starts. Cursor moves are single-line steps, so
//! keeping the cursor visible never needs more than a one-line scroll.

use std::ops::Range;

/// Visible line range of constant height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    page_start: usize,
    page_end: usize,
}

impl Viewport {
    /// Creates a viewport showing the first `height` lines.
    ///
    /// A height of zero is raised to one so the cursor line always fits.
    pub fn new(height: usize) -> Self {
        Self {
            page_start: 0,
            page_end: height.max(1),
        }
    }

    pub fn page_start(&self) -> usize {
        self.page_start
    }

    pub fn page_end(&self) -> usize {
        self.page_end
    }

    /// Number of screen rows the viewport covers.
    pub fn height(&self) -> usize {
        self.page_end - self.page_start
    }

    /// Returns true if `line` is on screen.
    pub fn contains(&self, line: usize) -> bool {
        (self.page_start..self.page_end).contains(&line)
    }

    /// Scrolls one line down if `line` has reached `page_end`.
    ///
    /// Returns true when the visible range moved and needs a full re-render.
    pub fn scroll_down_if_needed(&mut self, line: usize) -> bool {
        if line < self.page_end {
            return false;
        }
        self.page_start += 1;
        self.page_end += 1;
        true
    }

    /// Scrolls one line up if `line` has fallen above `page_start`.
    pub fn scroll_up_if_needed(&mut self, line: usize) -> bool {
        if line >= self.page_start {
            return false;
        }
        self.page_start -= 1;
        self.page_end -= 1;
        true
    }

    /// Brings `line` back on screen after a single-line cursor step.
    pub fn reconcile(&mut self, line: usize) -> bool {
        let scrolled = self.scroll_down_if_needed(line) || self.scroll_up_if_needed(line);
        debug_assert!(
            self.contains(line),
            "cursor line {line} left viewport {}..{}",
            self.page_start,
            self.page_end
        );
        scrolled
    }

    /// Document lines to draw, cut short at the end of the document.
    pub fn visible_range(&self, line_count: usize) -> Range<usize> {
        self.page_start..self.page_end.min(line_count)
    }

    /// Screen row of a visible document line.
    pub fn screen_row(&self, line: usize) -> usize {
        line.saturating_sub(self.page_start)
    }
}
