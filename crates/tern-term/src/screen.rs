//! Screen drawing: a boxed status bar on top, document text below.

use std::borrow::Cow;
use std::io::{self, Stdout, Write};
use std::ops::Range;

use crossterm::cursor::{MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use tern_core::Surface;

/// Raw mode and the alternate screen for as long as the guard lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        tracing::debug!("Entered raw mode");
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        tracing::debug!("Restored terminal");
    }
}

/// A fixed-size terminal screen.
///
/// Rows `0..status_rows` hold the status bar; text row `n` lives at screen
/// row `status_rows + n`.
pub struct Screen<W: Write> {
    out: W,
    width: usize,
    height: usize,
    status_rows: usize,
}

impl Screen<Stdout> {
    /// Opens a screen on stdout sized to the current terminal.
    pub fn stdout(status_bar_height: usize) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        tracing::info!("Terminal size {}x{}", width, height);
        Ok(Self::new(io::stdout(), width, height, status_bar_height))
    }
}

impl<W: Write> Screen<W> {
    /// Creates a screen writing to `out`.
    ///
    /// The status bar gets at least one row and never takes the last row,
    /// so at least one text row remains. A one-row terminal shows text only.
    pub fn new(out: W, width: u16, height: u16, status_bar_height: usize) -> Self {
        let height = usize::from(height).max(1);
        let status_rows = if height > 1 {
            status_bar_height.clamp(1, height - 1)
        } else {
            0
        };
        Self {
            out,
            width: usize::from(width).max(1),
            height,
            status_rows,
        }
    }

    pub fn status_rows(&self) -> usize {
        self.status_rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_row(&mut self, row: usize, text: &str) -> io::Result<()> {
        if row >= self.height {
            return Ok(());
        }
        let text = truncate(text, self.width);
        queue!(
            self.out,
            MoveTo(0, row as u16),
            Clear(ClearType::CurrentLine),
            Print(text)
        )
    }

    fn status_box(&self, status: &str, message: Option<&str>) -> Vec<String> {
        let rows = self.status_rows;
        if rows < 3 || self.width < 2 {
            let mut lines = vec![status_row(status, message, self.width)];
            lines.resize(rows, String::new());
            return lines;
        }

        let inner = self.width - 2;
        let border = "─".repeat(inner);
        let mut lines = Vec::with_capacity(rows);
        lines.push(format!("┌{}┐", border));
        lines.push(format!("│{}│", status_row(status, message, inner)));
        for _ in 2..rows - 1 {
            lines.push(format!("│{}│", " ".repeat(inner)));
        }
        lines.push(format!("└{}┘", border));
        lines
    }
}

impl<W: Write> Surface for Screen<W> {
    fn text_height(&self) -> usize {
        self.height - self.status_rows
    }

    fn render_lines(&mut self, first_row: usize, lines: &[&[u8]]) -> io::Result<()> {
        let top = self.status_rows + first_row;
        for (offset, line) in lines.iter().enumerate() {
            let text = cells(line, self.width);
            self.write_row(top + offset, &text)?;
        }
        Ok(())
    }

    fn clear_rows(&mut self, rows: Range<usize>) -> io::Result<()> {
        for row in rows {
            self.write_row(self.status_rows + row, "")?;
        }
        Ok(())
    }

    fn render_status(&mut self, status: &str, message: Option<&str>) -> io::Result<()> {
        for (row, line) in self.status_box(status, message).iter().enumerate() {
            self.write_row(row, line)?;
        }
        Ok(())
    }

    fn move_cursor(&mut self, row: usize, column: usize) -> io::Result<()> {
        let row = (self.status_rows + row).min(self.height - 1);
        let column = column.min(self.width - 1);
        queue!(self.out, MoveTo(column as u16, row as u16), Show)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Turns line bytes into screen cells, one cell per byte.
///
/// Printable ASCII shows as itself. Every other byte, including tabs, escape
/// bytes and parts of multi-byte characters, shows as `?`.
fn cells(bytes: &[u8], width: usize) -> String {
    bytes
        .iter()
        .take(width)
        .map(|&b| if (b' '..=b'~').contains(&b) { b as char } else { '?' })
        .collect()
}

/// Cuts `text` to at most `width` characters.
fn truncate(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Replaces control characters so they cannot move the terminal cursor.
fn printable(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { '?' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Lays out the status text on the left and the message on the right,
/// padded to exactly `width` characters.
fn status_row(status: &str, message: Option<&str>, width: usize) -> String {
    let mut row = format!(" {}", printable(status));
    if let Some(message) = message {
        let used = row.chars().count();
        let needed = message.chars().count() + 1;
        if used + needed < width {
            row.push_str(&" ".repeat(width - used - needed));
        } else {
            row.push_str("  ");
        }
        row.push_str(&printable(message));
    }

    let mut row = truncate(&row, width).to_string();
    let len = row.chars().count();
    row.push_str(&" ".repeat(width - len));
    row
}
