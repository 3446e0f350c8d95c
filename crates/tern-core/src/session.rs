//! The editing session: one document, one editor, one blocking key loop.
//!
//! ## Learning: Traits at the Seams
//!
//! The session talks to the outside world through two small traits.
//! `KeySource` is the only place the program waits; `Surface` is the only
//! place it draws. A terminal implements both, and tests implement them with
//! a scripted key list and a recording screen.

use std::io;
use std::ops::Range;
use std::path::Path;

use crate::config::Config;
use crate::document::Document;
use crate::editor::Editor;
use crate::event::Redraw;
use crate::keymap::{KeyPress, Keymap};
use crate::CoreResult;

/// Blocking source of key presses.
pub trait KeySource {
    /// Waits for the next key. Returns `Ok(None)` once input is closed.
    fn next_key(&mut self) -> io::Result<Option<KeyPress>>;
}

/// Display surface for document lines, the status line and the cursor.
///
/// Rows are relative to the text area, not the whole screen.
pub trait Surface {
    /// Rows available for document text.
    fn text_height(&self) -> usize;

    /// Draws `lines` on consecutive rows starting at `first_row`.
    ///
    /// Lines are raw bytes; columns on screen are byte offsets.
    fn render_lines(&mut self, first_row: usize, lines: &[&[u8]]) -> io::Result<()>;

    /// Blanks text rows that show no document line.
    fn clear_rows(&mut self, rows: Range<usize>) -> io::Result<()>;

    /// Draws the status line and an optional message.
    fn render_status(&mut self, status: &str, message: Option<&str>) -> io::Result<()>;

    /// Places the visible cursor.
    fn move_cursor(&mut self, row: usize, column: usize) -> io::Result<()>;

    /// Pushes pending output to the display.
    fn flush(&mut self) -> io::Result<()>;
}

/// A running edit of one file.
pub struct Session {
    document: Document,
    editor: Editor,
}

impl Session {
    /// Opens `path` for editing on a display `height` text rows tall.
    ///
    /// A missing file starts a new, empty document.
    pub fn open(path: impl AsRef<Path>, config: &Config, height: usize) -> Self {
        let (document, existed) = Document::load(path);
        if !existed {
            tracing::debug!("Editing new file {}", document.name());
        }
        let editor = Editor::with_keymap(height, Keymap::from_config(config));
        Self::new(document, editor)
    }

    pub fn new(document: Document, editor: Editor) -> Self {
        Self { document, editor }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Runs until the user quits or `keys` runs dry.
    pub fn run(&mut self, keys: &mut impl KeySource, surface: &mut impl Surface) -> CoreResult<()> {
        self.draw(surface, Redraw::Full)?;

        while !self.editor.should_quit() {
            let Some(key) = keys.next_key()? else {
                tracing::info!("Input closed, ending session");
                break;
            };
            let redraw = self.editor.handle_key(&mut self.document, &key)?;
            if !self.editor.should_quit() {
                self.draw(surface, redraw)?;
            }
        }

        Ok(())
    }

    fn draw(&self, surface: &mut impl Surface, redraw: Redraw) -> CoreResult<()> {
        let viewport = self.editor.viewport();
        let buffer = self.document.buffer();

        match redraw {
            Redraw::None => return Ok(()),
            Redraw::Cursor => {}
            Redraw::Line(line) => {
                if viewport.contains(line) {
                    let bytes = buffer.line_bytes(line)?;
                    surface.render_lines(viewport.screen_row(line), &[bytes])?;
                }
            }
            Redraw::Full => {
                let range = viewport.visible_range(buffer.line_count());
                let lines: Vec<&[u8]> = buffer
                    .lines()
                    .skip(range.start)
                    .take(range.len())
                    .collect();
                surface.render_lines(0, &lines)?;
                surface.clear_rows(lines.len()..viewport.height())?;
            }
        }

        surface.render_status(
            &self.editor.status_line(&self.document),
            self.editor.message(),
        )?;
        let position = self.editor.cursor().position();
        surface.move_cursor(viewport.screen_row(position.line), position.column)?;
        surface.flush()?;
        Ok(())
    }
}
