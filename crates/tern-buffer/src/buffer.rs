//! Line-oriented text buffer.
//!
//! ## Why a vector of lines?
//!
//! Every edit tern performs is local to one line or to a pair of adjacent
//! lines: insert a byte, delete a byte, split a line, join two lines. A plain
//! `Vec<Vec<u8>>` makes each of those an index lookup plus a short memmove,
//! and line `i` on screen is line `i` in memory.
//!
//! ## Learning: Bytes, not chars
//!
//! Columns are byte offsets. A file is loaded and written back byte for byte,
//! so a line that is not valid UTF-8 still round-trips untouched. How bytes
//! look on screen is up to the renderer.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::{BufferError, BufferResult};

/// An ordered sequence of lines that is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    /// Line contents without their terminators
    lines: Vec<Vec<u8>>,

    /// Whether the buffer changed since it was loaded or last written
    modified: bool,
}

impl LineBuffer {
    /// Creates a buffer holding a single empty line.
    ///
    /// # Example
    /// ```
    /// use tern_buffer::LineBuffer;
    ///
    /// let buffer = LineBuffer::new();
    /// assert_eq!(buffer.line_count(), 1);
    /// ```
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            modified: false,
        }
    }

    /// Reads newline-delimited lines from `reader`.
    ///
    /// A trailing `\n` ends the last line rather than starting a new one, and
    /// an empty input yields one empty line.
    pub fn read_from(mut reader: impl BufRead) -> BufferResult<Self> {
        let mut lines = Vec::new();
        let mut line = Vec::new();

        while reader.read_until(b'\n', &mut line)? > 0 {
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            lines.push(std::mem::take(&mut line));
        }

        if lines.is_empty() {
            lines.push(Vec::new());
        }

        Ok(Self {
            lines,
            modified: false,
        })
    }

    /// Loads a buffer from a file.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from(std::io::BufReader::new(file))
    }

    /// Writes every line followed by `\n`, including the last one.
    pub fn write_to(&self, mut writer: impl Write) -> BufferResult<()> {
        for line in &self.lines {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Overwrites `path` with the buffer contents.
    ///
    /// Returns the number of lines written and clears the modified flag.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> BufferResult<usize> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_to(std::io::BufWriter::new(file))?;
        self.modified = false;
        Ok(self.lines.len())
    }

    // ==================== Text Access ====================

    /// Returns the number of lines. Always at least 1.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the length of a line in bytes.
    pub fn line_length(&self, line: usize) -> BufferResult<usize> {
        self.line_bytes(line).map(<[u8]>::len)
    }

    /// Returns the raw bytes of a line.
    pub fn line_bytes(&self, line: usize) -> BufferResult<&[u8]> {
        self.lines
            .get(line)
            .map(Vec::as_slice)
            .ok_or(BufferError::PositionOutOfBounds { line, column: 0 })
    }

    /// Iterates over the raw bytes of every line.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.lines.iter().map(Vec::as_slice)
    }

    // ==================== Mutations ====================

    /// Inserts `ch` before column `col` of `line`.
    ///
    /// `col` may equal the line length, which appends.
    pub fn insert_char(&mut self, line: usize, col: usize, ch: u8) -> BufferResult<()> {
        let text = self.line_mut_checked(line, col)?;
        text.insert(col, ch);
        self.modified = true;
        Ok(())
    }

    /// Removes the byte immediately before column `col`.
    pub fn delete_char(&mut self, line: usize, col: usize) -> BufferResult<u8> {
        if col == 0 {
            return Err(BufferError::PositionOutOfBounds { line, column: col });
        }
        let text = self.line_mut_checked(line, col)?;
        let removed = text.remove(col - 1);
        self.modified = true;
        Ok(removed)
    }

    /// Splits `line` at `col`: the line keeps `[0, col)` and the remainder
    /// becomes a new line right after it.
    pub fn split_line(&mut self, line: usize, col: usize) -> BufferResult<()> {
        let rest = self.line_mut_checked(line, col)?.split_off(col);
        self.lines.insert(line + 1, rest);
        self.modified = true;
        Ok(())
    }

    /// Appends `line` to the line before it and removes `line`.
    ///
    /// Returns the previous line's original length, which is where the
    /// joined text starts.
    pub fn join_with_previous(&mut self, line: usize) -> BufferResult<usize> {
        if line == 0 {
            return Err(BufferError::NothingToJoin(line));
        }
        if line >= self.lines.len() {
            return Err(BufferError::PositionOutOfBounds { line, column: 0 });
        }

        let tail = self.lines.remove(line);
        let previous = &mut self.lines[line - 1];
        let join_column = previous.len();
        previous.extend_from_slice(&tail);
        self.modified = true;

        Ok(join_column)
    }

    // ==================== State Queries ====================

    /// Returns true if the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Validates `(line, col)` as an insertion point and returns the line.
    fn line_mut_checked(&mut self, line: usize, col: usize) -> BufferResult<&mut Vec<u8>> {
        match self.lines.get_mut(line) {
            Some(text) if col <= text.len() => Ok(text),
            _ => Err(BufferError::PositionOutOfBounds { line, column: col }),
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for LineBuffer {
    fn from(s: &str) -> Self {
        // Reading from a byte slice cannot fail.
        Self::read_from(s.as_bytes()).unwrap_or_default()
    }
}

impl From<Vec<String>> for LineBuffer {
    fn from(lines: Vec<String>) -> Self {
        let mut lines: Vec<Vec<u8>> = lines.into_iter().map(String::into_bytes).collect();
        if lines.is_empty() {
            lines.push(Vec::new());
        }
        Self {
            lines,
            modified: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(buffer: &LineBuffer) -> Vec<String> {
        (0..buffer.line_count())
            .map(|i| String::from_utf8_lossy(buffer.line_bytes(i).unwrap()).into_owned())
            .collect()
    }

    #[test]
    fn test_read_splits_on_newlines() {
        let buffer = LineBuffer::from("abc\n\ndef\n");
        assert_eq!(texts(&buffer), vec!["abc", "", "def"]);
    }

    #[test]
    fn test_read_without_trailing_newline() {
        let buffer = LineBuffer::from("abc\ndef");
        assert_eq!(texts(&buffer), vec!["abc", "def"]);
    }

    #[test]
    fn test_read_empty_input_has_one_line() {
        let buffer = LineBuffer::from("");
        assert_eq!(texts(&buffer), vec![""]);
    }

    #[test]
    fn test_read_keeps_carriage_returns() {
        let buffer = LineBuffer::from("a\r\nb");
        assert_eq!(buffer.line_bytes(0).unwrap(), b"a\r");
    }

    #[test]
    fn test_write_terminates_every_line() {
        let buffer = LineBuffer::from(vec!["abc".to_string(), String::new(), "def".to_string()]);
        let mut out = Vec::new();
        buffer.write_to(&mut out).unwrap();
        assert_eq!(out, b"abc\n\ndef\n");
    }

    #[test]
    fn test_non_utf8_bytes_round_trip() {
        let raw: &[u8] = b"caf\xe9\nok\n";
        let buffer = LineBuffer::read_from(raw).unwrap();
        assert_eq!(buffer.line_length(0).unwrap(), 4);

        let mut out = Vec::new();
        buffer.write_to(&mut out).unwrap();
        assert_eq!(out, raw);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round_trip.txt");

        let mut buffer = LineBuffer::from(vec!["abc".to_string(), String::new(), "def".to_string()]);
        buffer.insert_char(0, 0, b'>').unwrap();
        assert!(buffer.is_modified());

        assert_eq!(buffer.save_as(&path).unwrap(), 3);
        assert!(!buffer.is_modified());

        let reloaded = LineBuffer::from_file(&path).unwrap();
        assert_eq!(texts(&reloaded), vec![">abc", "", "def"]);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("file.txt");

        let mut buffer = LineBuffer::from("abc");
        buffer.insert_char(0, 3, b'!').unwrap();

        assert!(matches!(buffer.save_as(&path), Err(BufferError::Io(_))));
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_insert_at_end_of_line() {
        let mut buffer = LineBuffer::from("ab");
        buffer.insert_char(0, 2, b'c').unwrap();
        assert_eq!(texts(&buffer), vec!["abc"]);
    }

    #[test]
    fn test_insert_past_end_is_rejected() {
        let mut buffer = LineBuffer::from("ab");
        let err = buffer.insert_char(0, 3, b'c').unwrap_err();
        assert!(matches!(
            err,
            BufferError::PositionOutOfBounds { line: 0, column: 3 }
        ));
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_insert_on_missing_line_is_rejected() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.insert_char(1, 0, b'x').is_err());
    }

    #[test]
    fn test_delete_removes_previous_byte() {
        let mut buffer = LineBuffer::from("abc");
        assert_eq!(buffer.delete_char(0, 2).unwrap(), b'b');
        assert_eq!(texts(&buffer), vec!["ac"]);
    }

    #[test]
    fn test_delete_at_column_zero_is_rejected() {
        let mut buffer = LineBuffer::from("abc");
        assert!(buffer.delete_char(0, 0).is_err());
        assert_eq!(texts(&buffer), vec!["abc"]);
    }

    #[test]
    fn test_split_at_edges() {
        let mut buffer = LineBuffer::from("abc");
        buffer.split_line(0, 3).unwrap();
        assert_eq!(texts(&buffer), vec!["abc", ""]);

        buffer.split_line(0, 0).unwrap();
        assert_eq!(texts(&buffer), vec!["", "abc", ""]);
    }

    #[test]
    fn test_join_first_line_is_rejected() {
        let mut buffer = LineBuffer::from("a\nb");
        assert!(matches!(
            buffer.join_with_previous(0),
            Err(BufferError::NothingToJoin(0))
        ));
        assert!(buffer.join_with_previous(2).is_err());
    }

    #[test]
    fn test_join_empty_line() {
        let mut buffer = LineBuffer::from("abc\n");
        buffer.split_line(0, 3).unwrap();
        assert_eq!(buffer.join_with_previous(1).unwrap(), 3);
        assert_eq!(texts(&buffer), vec!["abc"]);
    }

    proptest! {
        #[test]
        fn split_then_join_restores_line(
            lines in prop::collection::vec("[ -~]{0,12}", 1..6),
            line_pick in any::<prop::sample::Index>(),
            col_pick in any::<prop::sample::Index>(),
        ) {
            let original = LineBuffer::from(lines);
            let mut buffer = original.clone();

            let line = line_pick.index(buffer.line_count());
            let col = col_pick.index(buffer.line_length(line).unwrap() + 1);

            buffer.split_line(line, col).unwrap();
            prop_assert_eq!(buffer.line_count(), original.line_count() + 1);

            let joined_at = buffer.join_with_previous(line + 1).unwrap();
            prop_assert_eq!(joined_at, col);
            prop_assert_eq!(texts(&buffer), texts(&original));
        }
    }
}
