//! # tern-term
//!
//! Terminal front-end for the editor session, built on crossterm.
//!
//! ## Learning: RAII for Terminal State
//!
//! Raw mode and the alternate screen are process-wide settings. Tying them to
//! a guard value means every exit path, including `?` and panics that unwind,
//! hands the user back a working shell.

mod input;
mod screen;

pub use input::{translate, TerminalKeys};
pub use screen::{Screen, TerminalGuard};
