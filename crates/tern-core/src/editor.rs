//! The mode controller.
//!
//! ## Learning: The State Machine
//!
//! ```text
//!            i / a / A
//!   VISUAL ────────────► INSERT
//!     │   ◄────────────
//!     │        Esc
//!     └── q ──► quit
//! ```
//!
//! `Editor` owns the cursor, the viewport and the keymap. The document is
//! borrowed for the duration of one key, so the editor can never hold on to
//! stale text between keys.

use tern_buffer::{ColumnLimit, Cursor, Position};

use crate::command::Command;
use crate::document::Document;
use crate::event::Redraw;
use crate::keymap::{KeyPress, Keymap};
use crate::viewport::Viewport;
use crate::CoreResult;

/// Editor modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Navigation only
    #[default]
    Visual,
    /// Typing text
    Insert,
}

impl Mode {
    /// Name shown in the status line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Visual => "VISUAL",
            Mode::Insert => "INSERT",
        }
    }

    /// How far right the cursor may rest in this mode.
    pub fn column_limit(&self) -> ColumnLimit {
        match self {
            Mode::Visual => ColumnLimit::OnLastChar,
            Mode::Insert => ColumnLimit::PastEnd,
        }
    }
}

/// The editing state machine.
pub struct Editor {
    /// Current mode
    mode: Mode,

    /// Logical cursor
    cursor: Cursor,

    /// Visible line range
    viewport: Viewport,

    /// Key dispatch table
    keymap: Keymap,

    /// Transient status message, e.g. the result of a save
    message: Option<String>,

    /// Whether the editor should quit
    should_quit: bool,
}

impl Editor {
    /// Creates an editor for a display `height` rows tall with default keys.
    pub fn new(height: usize) -> Self {
        Self::with_keymap(height, Keymap::default())
    }

    /// Creates an editor with a custom keymap.
    pub fn with_keymap(height: usize, keymap: Keymap) -> Self {
        Self {
            mode: Mode::default(),
            cursor: Cursor::new(),
            viewport: Viewport::new(height),
            keymap,
            message: None,
            should_quit: false,
        }
    }

    // ==================== Dispatch ====================

    /// Handles one key press against `doc`.
    ///
    /// Keys without a meaning in the current mode are ignored.
    pub fn handle_key(&mut self, doc: &mut Document, key: &KeyPress) -> CoreResult<Redraw> {
        match self.keymap.resolve(self.mode, key) {
            Some(command) => self.execute(doc, command),
            None => {
                tracing::trace!("Unbound key {} in {} mode", key, self.mode.as_str());
                Ok(Redraw::None)
            }
        }
    }

    /// Executes a command against `doc`.
    ///
    /// Buffer errors mean a broken cursor invariant and are propagated
    /// rather than clamped.
    pub fn execute(&mut self, doc: &mut Document, command: Command) -> CoreResult<Redraw> {
        let had_message = self.message.take().is_some();

        let redraw = match command {
            Command::MoveLeft => {
                let moved = self.cursor.move_left();
                self.follow_cursor(moved)
            }
            Command::MoveRight => {
                let moved = self
                    .cursor
                    .move_right(doc.buffer(), self.mode.column_limit())?;
                self.follow_cursor(moved)
            }
            Command::MoveDown => {
                let moved = self.cursor.move_down(doc.buffer())?;
                self.follow_cursor(moved)
            }
            Command::MoveUp => {
                let moved = self.cursor.move_up(doc.buffer())?;
                self.follow_cursor(moved)
            }
            Command::MoveToLineStart => {
                let moved = self.cursor.move_to_line_start();
                self.follow_cursor(moved)
            }
            Command::MoveToLineEnd => {
                let moved = self.cursor.move_to_line_end(doc.buffer())?;
                self.follow_cursor(moved)
            }

            Command::EnterInsertMode => self.set_mode(Mode::Insert),
            Command::Append => {
                self.cursor.advance_for_append(doc.buffer())?;
                self.set_mode(Mode::Insert)
            }
            Command::AppendAtLineEnd => {
                self.cursor.move_past_end(doc.buffer())?;
                self.set_mode(Mode::Insert)
            }
            Command::EnterVisualMode => {
                self.cursor.clamp(doc.buffer(), ColumnLimit::OnLastChar)?;
                self.set_mode(Mode::Visual)
            }

            Command::InsertChar(ch) => self.insert_char(doc, ch)?,
            Command::DeleteBackward => self.delete_backward(doc)?,
            Command::SplitLine => self.split_line(doc)?,

            Command::Save => self.save(doc),
            Command::Quit => {
                if doc.is_modified() {
                    tracing::warn!("Quitting with unsaved changes to {}", doc.name());
                }
                tracing::debug!("Quit requested");
                self.should_quit = true;
                Redraw::None
            }
        };

        if had_message && self.message.is_none() {
            return Ok(redraw.merge(Redraw::Cursor));
        }
        Ok(redraw)
    }

    // ==================== Editing ====================

    fn insert_char(&mut self, doc: &mut Document, ch: u8) -> CoreResult<Redraw> {
        let Position { line, column } = self.cursor.position();
        doc.buffer_mut().insert_char(line, column, ch)?;
        self.cursor.move_to(Position::new(line, column + 1));
        Ok(Redraw::Line(line))
    }

    fn delete_backward(&mut self, doc: &mut Document) -> CoreResult<Redraw> {
        let Position { line, column } = self.cursor.position();

        if column > 0 {
            doc.buffer_mut().delete_char(line, column)?;
            self.cursor.move_to(Position::new(line, column - 1));
            return Ok(Redraw::Line(line));
        }
        if line == 0 {
            return Ok(Redraw::None);
        }

        let join_column = doc.buffer_mut().join_with_previous(line)?;
        self.cursor.move_to(Position::new(line - 1, join_column));
        self.viewport.reconcile(line - 1);
        Ok(Redraw::Full)
    }

    fn split_line(&mut self, doc: &mut Document) -> CoreResult<Redraw> {
        let Position { line, column } = self.cursor.position();
        doc.buffer_mut().split_line(line, column)?;
        self.cursor.move_to(Position::new(line + 1, 0));
        self.viewport.reconcile(line + 1);
        Ok(Redraw::Full)
    }

    fn save(&mut self, doc: &mut Document) -> Redraw {
        self.message = Some(match doc.save() {
            Ok(lines) => format!("\"{}\" {}L written", doc.name(), lines),
            Err(e) => {
                tracing::error!("Saving {} failed: {}", doc.path().display(), e);
                format!("write failed: {}", e)
            }
        });
        Redraw::Cursor
    }

    // ==================== State ====================

    fn set_mode(&mut self, mode: Mode) -> Redraw {
        if self.mode != mode {
            tracing::debug!("Mode {} -> {}", self.mode.as_str(), mode.as_str());
            self.mode = mode;
        }
        Redraw::Cursor
    }

    fn follow_cursor(&mut self, moved: bool) -> Redraw {
        let scrolled = moved && self.viewport.reconcile(self.cursor.line());
        Redraw::for_move(moved, scrolled)
    }

    /// Returns the current editor mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns the message from the last command, if it left one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true if the editor should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Formats `<MODE>    <file_name>    (<line>, <column>)`, 1-indexed.
    pub fn status_line(&self, doc: &Document) -> String {
        format!(
            "{}    {}    {}",
            self.mode.as_str(),
            doc.name(),
            self.cursor.position()
        )
    }
}
