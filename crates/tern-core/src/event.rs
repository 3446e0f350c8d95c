//! Render requests produced by the editor.
//!
//! ## Learning: Values instead of callbacks
//!
//! The editor never draws. Each dispatched key yields a `Redraw` value that
//! says how much of the screen went stale, and the session decides how to
//! paint it. That keeps the engine testable without a terminal.

/// How much of the display a dispatched command invalidated.
///
/// Variants are ordered by cost, so `max` combines two requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Redraw {
    /// Nothing visible changed
    #[default]
    None,
    /// Reposition the cursor marker and refresh the status line
    Cursor,
    /// One document line changed in place; the viewport did not move
    Line(usize),
    /// The visible range scrolled or lines were added or removed
    Full,
}

impl Redraw {
    /// Picks the request that covers both `self` and `other`.
    pub fn merge(self, other: Redraw) -> Redraw {
        match (self, other) {
            (Redraw::Line(a), Redraw::Line(b)) if a != b => Redraw::Full,
            _ => self.max(other),
        }
    }

    /// Redraw for a cursor move, given whether the viewport scrolled.
    pub fn for_move(moved: bool, scrolled: bool) -> Redraw {
        match (moved, scrolled) {
            (_, true) => Redraw::Full,
            (true, false) => Redraw::Cursor,
            (false, false) => Redraw::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_larger_request() {
        assert_eq!(Redraw::None.merge(Redraw::Cursor), Redraw::Cursor);
        assert_eq!(Redraw::Line(3).merge(Redraw::Cursor), Redraw::Line(3));
        assert_eq!(Redraw::Cursor.merge(Redraw::Full), Redraw::Full);
    }

    #[test]
    fn test_merge_different_lines_is_full() {
        assert_eq!(Redraw::Line(1).merge(Redraw::Line(2)), Redraw::Full);
        assert_eq!(Redraw::Line(1).merge(Redraw::Line(1)), Redraw::Line(1));
    }

    #[test]
    fn test_for_move() {
        assert_eq!(Redraw::for_move(false, false), Redraw::None);
        assert_eq!(Redraw::for_move(true, false), Redraw::Cursor);
        assert_eq!(Redraw::for_move(true, true), Redraw::Full);
    }
}
