//! # Tern Core
//!
//! The modal editing engine.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Session                           │
//! │  ┌──────────────┐     ┌─────────────────────────────────┐ │
//! │  │   Document   │◄────│      Editor (mode controller)   │ │
//! │  │  LineBuffer  │ &mut│  Mode · Cursor · Viewport ·     │ │
//! │  │  path, name  │     │  Keymap (dispatch table)        │ │
//! │  └──────────────┘     └─────────────────────────────────┘ │
//! │         ▲ next_key()                 │ Redraw             │
//! │   ┌─────┴─────┐               ┌──────▼──────┐             │
//! │   │ KeySource │               │   Surface   │             │
//! │   └───────────┘               └─────────────┘             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The session owns the document and lends it to the editor for each key.
//! The editor owns everything derived from the document and answers every
//! key with a `Redraw` request that the session turns into surface calls.

pub mod command;
pub mod config;
pub mod document;
pub mod editor;
pub mod event;
pub mod keymap;
pub mod session;
pub mod viewport;

pub use command::Command;
pub use config::{Config, ConfigError};
pub use document::Document;
pub use editor::{Editor, Mode};
pub use event::Redraw;
pub use keymap::{Key, KeyBinding, KeyPress, Keymap, Modifiers};
pub use session::{KeySource, Session, Surface};
pub use viewport::Viewport;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer error: {0}")]
    Buffer(#[from] tern_buffer::BufferError),
}
