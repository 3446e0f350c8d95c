//! # Tern Buffer
//!
//! The line buffer behind a tern document and the cursor that walks it.
//!
//! ## Key Concepts
//!
//! ### Lines as bytes
//! - `LineBuffer` owns one `Vec<u8>` per line, in on-disk order
//! - Columns are byte indices; no encoding conversion ever happens
//! - The buffer always holds at least one line
//!
//! ### Preconditions
//! - Every mutation checks its own bounds and returns a `BufferError`
//!   instead of clamping, so a bad position never corrupts the text

mod buffer;
mod cursor;

pub use buffer::LineBuffer;
pub use cursor::{ColumnLimit, Cursor, Position};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("Line {0} has no previous line to join with")]
    NothingToJoin(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
