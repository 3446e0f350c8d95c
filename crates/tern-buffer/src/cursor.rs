//! Cursor and position types for text navigation.
//!
//! ## Learning: Sticky Columns
//!
//! The cursor remembers the column the user last chose on purpose
//! (`desired_column`). Horizontal moves and explicit jumps update it;
//! vertical moves only read it. Walking down through a short line and back
//! up therefore lands on the original column instead of the clamped one.

use crate::{BufferResult, LineBuffer};

/// A position in the text buffer (line and column).
///
/// Both line and column are 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in bytes)
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position at the start of the document.
    pub const ZERO: Position = Position { line: 0, column: 0 };
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display as 1-indexed for user-facing output
        write!(f, "({}, {})", self.line + 1, self.column + 1)
    }
}

/// How far right the cursor may rest on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLimit {
    /// On the last character; column 0 on an empty line
    OnLastChar,
    /// One past the last character, the insertion point
    PastEnd,
}

impl ColumnLimit {
    /// Returns the largest allowed column for a line of `line_len` bytes.
    pub fn max_column(self, line_len: usize) -> usize {
        match self {
            ColumnLimit::OnLastChar => line_len.saturating_sub(1),
            ColumnLimit::PastEnd => line_len,
        }
    }
}

/// The editing cursor.
///
/// Every move returns `Ok(true)` when the position changed so callers know
/// whether the viewport needs reconciling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    line: usize,
    column: usize,
    /// Preferred column for vertical movement
    desired_column: usize,
}

impl Cursor {
    /// Creates a cursor at line 0, column 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current position.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn desired_column(&self) -> usize {
        self.desired_column
    }

    /// Places the cursor explicitly; the column becomes the desired column.
    pub fn move_to(&mut self, position: Position) {
        self.line = position.line;
        self.set_column(position.column);
    }

    /// Moves one column left. Never wraps to the previous line.
    pub fn move_left(&mut self) -> bool {
        if self.column == 0 {
            return false;
        }
        self.set_column(self.column - 1);
        true
    }

    /// Moves one column right, up to the limit for the current mode.
    pub fn move_right(&mut self, buffer: &LineBuffer, limit: ColumnLimit) -> BufferResult<bool> {
        let max = limit.max_column(buffer.line_length(self.line)?);
        if self.column >= max {
            return Ok(false);
        }
        self.set_column(self.column + 1);
        Ok(true)
    }

    /// Moves one line down, restoring the desired column where it fits.
    pub fn move_down(&mut self, buffer: &LineBuffer) -> BufferResult<bool> {
        if self.line + 1 >= buffer.line_count() {
            return Ok(false);
        }
        self.step_vertically(buffer, self.line + 1)?;
        Ok(true)
    }

    /// Moves one line up, restoring the desired column where it fits.
    pub fn move_up(&mut self, buffer: &LineBuffer) -> BufferResult<bool> {
        if self.line == 0 {
            return Ok(false);
        }
        self.step_vertically(buffer, self.line - 1)?;
        Ok(true)
    }

    /// Jumps to column 0.
    pub fn move_to_line_start(&mut self) -> bool {
        let moved = self.column != 0;
        self.set_column(0);
        moved
    }

    /// Jumps onto the last character of the line.
    pub fn move_to_line_end(&mut self, buffer: &LineBuffer) -> BufferResult<bool> {
        let end = ColumnLimit::OnLastChar.max_column(buffer.line_length(self.line)?);
        let moved = self.column != end;
        self.set_column(end);
        Ok(moved)
    }

    /// Positions the cursor for appending after the current character.
    ///
    /// On a non-empty line the cursor advances one column unless it already
    /// sits one past the end; on an empty line it stays put.
    pub fn advance_for_append(&mut self, buffer: &LineBuffer) -> BufferResult<bool> {
        let len = buffer.line_length(self.line)?;
        if len == 0 || self.column >= len {
            return Ok(false);
        }
        self.set_column(self.column + 1);
        Ok(true)
    }

    /// Positions the cursor one past the last character.
    pub fn move_past_end(&mut self, buffer: &LineBuffer) -> BufferResult<bool> {
        let end = ColumnLimit::PastEnd.max_column(buffer.line_length(self.line)?);
        let moved = self.column != end;
        self.set_column(end);
        Ok(moved)
    }

    /// Pulls the column back inside `limit` for the current line.
    pub fn clamp(&mut self, buffer: &LineBuffer, limit: ColumnLimit) -> BufferResult<bool> {
        let max = limit.max_column(buffer.line_length(self.line)?);
        if self.column <= max {
            return Ok(false);
        }
        self.set_column(max);
        Ok(true)
    }

    fn set_column(&mut self, column: usize) {
        self.column = column;
        self.desired_column = column;
    }

    fn step_vertically(&mut self, buffer: &LineBuffer, target: usize) -> BufferResult<()> {
        let len = buffer.line_length(target)?;
        self.line = target;
        self.column = if len == 0 {
            0
        } else if len > self.desired_column {
            self.desired_column
        } else {
            len - 1
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(lines: &[&str]) -> LineBuffer {
        LineBuffer::from(lines.iter().map(|l| l.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_position_display_is_one_indexed() {
        assert_eq!(Position::new(0, 0).to_string(), "(1, 1)");
        assert_eq!(Position::new(4, 9).to_string(), "(5, 10)");
    }

    #[test]
    fn test_column_limits() {
        assert_eq!(ColumnLimit::OnLastChar.max_column(0), 0);
        assert_eq!(ColumnLimit::OnLastChar.max_column(5), 4);
        assert_eq!(ColumnLimit::PastEnd.max_column(0), 0);
        assert_eq!(ColumnLimit::PastEnd.max_column(5), 5);
    }

    #[test]
    fn test_left_stops_at_column_zero() {
        let mut cursor = Cursor::new();
        assert!(!cursor.move_left());
        assert_eq!(cursor.position(), Position::ZERO);
    }

    #[test]
    fn test_left_does_not_wrap() {
        let buf = buffer(&["abc", "def"]);
        let mut cursor = Cursor::new();
        cursor.move_down(&buf).unwrap();
        assert!(!cursor.move_left());
        assert_eq!(cursor.position(), Position::new(1, 0));
    }

    #[test]
    fn test_right_respects_mode_limit() {
        let buf = buffer(&["ab"]);
        let mut cursor = Cursor::new();

        assert!(cursor.move_right(&buf, ColumnLimit::OnLastChar).unwrap());
        assert!(!cursor.move_right(&buf, ColumnLimit::OnLastChar).unwrap());
        assert_eq!(cursor.column(), 1);

        assert!(cursor.move_right(&buf, ColumnLimit::PastEnd).unwrap());
        assert!(!cursor.move_right(&buf, ColumnLimit::PastEnd).unwrap());
        assert_eq!(cursor.column(), 2);
    }

    #[test]
    fn test_right_on_empty_line_is_noop() {
        let buf = buffer(&[""]);
        let mut cursor = Cursor::new();
        assert!(!cursor.move_right(&buf, ColumnLimit::OnLastChar).unwrap());
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_sticky_column_survives_short_line() {
        let buf = buffer(&["abcde", "x", "vwxyz"]);
        let mut cursor = Cursor::new();
        for _ in 0..4 {
            cursor.move_right(&buf, ColumnLimit::OnLastChar).unwrap();
        }
        assert_eq!(cursor.column(), 4);

        cursor.move_down(&buf).unwrap();
        assert_eq!(cursor.position(), Position::new(1, 0));
        cursor.move_down(&buf).unwrap();
        assert_eq!(cursor.position(), Position::new(2, 4));
        cursor.move_up(&buf).unwrap();
        assert_eq!(cursor.position(), Position::new(1, 0));
        cursor.move_up(&buf).unwrap();
        assert_eq!(cursor.position(), Position::new(0, 4));
        assert_eq!(cursor.desired_column(), 4);
    }

    #[test]
    fn test_vertical_move_onto_empty_line() {
        let buf = buffer(&["abc", "", "abc"]);
        let mut cursor = Cursor::new();
        cursor.move_to_line_end(&buf).unwrap();
        cursor.move_down(&buf).unwrap();
        assert_eq!(cursor.position(), Position::new(1, 0));
        assert_eq!(cursor.desired_column(), 2);
    }

    #[test]
    fn test_vertical_moves_stop_at_edges() {
        let buf = buffer(&["a", "b"]);
        let mut cursor = Cursor::new();
        assert!(!cursor.move_up(&buf).unwrap());
        assert!(cursor.move_down(&buf).unwrap());
        assert!(!cursor.move_down(&buf).unwrap());
        assert_eq!(cursor.line(), 1);
    }

    #[test]
    fn test_down_reconciles_against_shorter_line() {
        let buf = buffer(&["ab", "c"]);
        let mut cursor = Cursor::new();
        cursor.move_right(&buf, ColumnLimit::OnLastChar).unwrap();
        assert_eq!(cursor.position(), Position::new(0, 1));

        assert!(!cursor.move_right(&buf, ColumnLimit::OnLastChar).unwrap());
        cursor.move_down(&buf).unwrap();
        assert_eq!(cursor.position(), Position::new(1, 0));
    }

    #[test]
    fn test_line_start_and_end() {
        let buf = buffer(&["hello", ""]);
        let mut cursor = Cursor::new();

        assert!(cursor.move_to_line_end(&buf).unwrap());
        assert_eq!(cursor.column(), 4);
        assert_eq!(cursor.desired_column(), 4);

        assert!(cursor.move_to_line_start());
        assert_eq!(cursor.desired_column(), 0);

        cursor.move_down(&buf).unwrap();
        assert!(!cursor.move_to_line_end(&buf).unwrap());
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_append_advances_one_column() {
        let buf = buffer(&["abc"]);
        let mut cursor = Cursor::new();
        cursor.move_to_line_end(&buf).unwrap();
        assert!(cursor.advance_for_append(&buf).unwrap());
        assert_eq!(cursor.column(), 3);
        assert!(!cursor.advance_for_append(&buf).unwrap());
        assert_eq!(cursor.column(), 3);
    }

    #[test]
    fn test_append_on_empty_line_stays() {
        let buf = buffer(&[""]);
        let mut cursor = Cursor::new();
        assert!(!cursor.advance_for_append(&buf).unwrap());
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_move_past_end() {
        let buf = buffer(&["abc"]);
        let mut cursor = Cursor::new();
        assert!(cursor.move_past_end(&buf).unwrap());
        assert_eq!(cursor.position(), Position::new(0, 3));
        assert_eq!(cursor.desired_column(), 3);
    }

    #[test]
    fn test_clamp_pulls_back_insertion_point() {
        let buf = buffer(&["abc", ""]);
        let mut cursor = Cursor::new();
        cursor.move_past_end(&buf).unwrap();

        assert!(cursor.clamp(&buf, ColumnLimit::OnLastChar).unwrap());
        assert_eq!(cursor.column(), 2);
        assert_eq!(cursor.desired_column(), 2);
        assert!(!cursor.clamp(&buf, ColumnLimit::OnLastChar).unwrap());
    }

    #[test]
    fn test_move_to_sets_desired_column() {
        let mut cursor = Cursor::new();
        cursor.move_to(Position::new(3, 7));
        assert_eq!(cursor.position(), Position::new(3, 7));
        assert_eq!(cursor.desired_column(), 7);
    }

    #[test]
    fn test_cursor_on_missing_line_reports_error() {
        let buf = buffer(&["abc"]);
        let mut cursor = Cursor::new();
        cursor.move_to(Position::new(5, 0));
        assert!(cursor.move_right(&buf, ColumnLimit::PastEnd).is_err());
    }
}
