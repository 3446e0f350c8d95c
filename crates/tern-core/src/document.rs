//! The file being edited.
//!
//! ## Learning: Composition over Inheritance
//!
//! `Document` composes a `LineBuffer` with the path it came from. The buffer
//! knows how to edit and serialize lines; the document knows where they live
//! on disk and what a missing file means.

use std::path::{Path, PathBuf};

use tern_buffer::{BufferError, LineBuffer};

use crate::CoreResult;

/// A line buffer bound to a file path.
#[derive(Debug)]
pub struct Document {
    /// The underlying text buffer
    buffer: LineBuffer,

    /// Target of every save
    path: PathBuf,

    /// Display name, the path as given by the user
    name: String,
}

impl Document {
    /// Creates an empty document for `path` without touching the disk.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_buffer(path, LineBuffer::new())
    }

    /// Creates a document from an existing buffer.
    pub fn with_buffer(path: impl AsRef<Path>, buffer: LineBuffer) -> Self {
        let path = path.as_ref();
        Self {
            buffer,
            path: path.to_path_buf(),
            name: path.display().to_string(),
        }
    }

    /// Opens `path`, or starts a new file when it cannot be opened.
    ///
    /// Returns the document and whether the file existed. A missing file is
    /// not an error: the document starts as a single empty line.
    pub fn load(path: impl AsRef<Path>) -> (Self, bool) {
        let path = path.as_ref();
        match LineBuffer::from_file(path) {
            Ok(buffer) => {
                tracing::info!(
                    "Opened {} ({} lines)",
                    path.display(),
                    buffer.line_count()
                );
                (Self::with_buffer(path, buffer), true)
            }
            Err(BufferError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} does not exist, starting a new file", path.display());
                (Self::new(path), false)
            }
            Err(e) => {
                tracing::warn!("Could not open {}: {}; starting a new file", path.display(), e);
                (Self::new(path), false)
            }
        }
    }

    /// Writes the document back to its path.
    ///
    /// Returns the number of lines written.
    pub fn save(&mut self) -> CoreResult<usize> {
        let written = self.buffer.save_as(&self.path)?;
        tracing::info!("Wrote {} lines to {}", written, self.path.display());
        Ok(written)
    }

    // ==================== Getters ====================

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the document has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// Returns the text buffer.
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Returns a mutable reference to the buffer.
    pub fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    /// Returns the line count.
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }
}
