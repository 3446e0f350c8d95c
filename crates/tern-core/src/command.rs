//! Command system for editor actions.
//!
//! ## Learning: The Command Pattern
//!
//! Keys never touch the document directly. The keymap turns a key into a
//! `Command` value and the editor executes it. Commands are plain data, so
//! they can be bound from a config file by name and matched exhaustively.

/// Built-in editor commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Cursor movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveToLineStart,
    MoveToLineEnd,

    // Mode
    EnterInsertMode,
    Append,
    AppendAtLineEnd,
    EnterVisualMode,

    // Editing
    InsertChar(u8),
    DeleteBackward,
    SplitLine,

    // File
    Save,
    Quit,
}

/// Commands that can be bound from configuration, with their names.
const NAMED: &[(&str, Command)] = &[
    ("cursor.left", Command::MoveLeft),
    ("cursor.right", Command::MoveRight),
    ("cursor.up", Command::MoveUp),
    ("cursor.down", Command::MoveDown),
    ("cursor.line_start", Command::MoveToLineStart),
    ("cursor.line_end", Command::MoveToLineEnd),
    ("mode.insert", Command::EnterInsertMode),
    ("mode.append", Command::Append),
    ("mode.append_end", Command::AppendAtLineEnd),
    ("editor.save", Command::Save),
    ("editor.quit", Command::Quit),
];

impl Command {
    /// Returns the command's display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::MoveLeft => "Move Left",
            Command::MoveRight => "Move Right",
            Command::MoveUp => "Move Up",
            Command::MoveDown => "Move Down",
            Command::MoveToLineStart => "Move to Line Start",
            Command::MoveToLineEnd => "Move to Line End",
            Command::EnterInsertMode => "Enter Insert Mode",
            Command::Append => "Append",
            Command::AppendAtLineEnd => "Append at Line End",
            Command::EnterVisualMode => "Enter Visual Mode",
            Command::InsertChar(_) => "Insert Character",
            Command::DeleteBackward => "Delete Backward",
            Command::SplitLine => "Split Line",
            Command::Save => "Save",
            Command::Quit => "Quit",
        }
    }

    /// Looks up a bindable command by its config name, e.g. `editor.save`.
    ///
    /// Only visual-mode commands have names; editing commands are reached
    /// through insert mode.
    pub fn from_name(name: &str) -> Option<Command> {
        NAMED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, cmd)| *cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display_name() {
        assert_eq!(Command::Save.display_name(), "Save");
        assert_eq!(Command::InsertChar(b'x').display_name(), "Insert Character");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Command::from_name("editor.save"), Some(Command::Save));
        assert_eq!(Command::from_name("cursor.line_end"), Some(Command::MoveToLineEnd));
        assert_eq!(Command::from_name("editor.undo"), None);
    }

    #[test]
    fn test_names_are_unique_and_reversible() {
        let names: std::collections::HashSet<_> = NAMED.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), NAMED.len());
        for (name, cmd) in NAMED {
            assert_eq!(Command::from_name(name), Some(*cmd));
        }
        assert!(NAMED.iter().all(|(_, cmd)| *cmd != Command::SplitLine));
    }
}
