//! Keyboard mapping and input handling.
//!
//! ## Learning: Dispatch Tables
//!
//! Instead of a `match` per mode scattered through the editor, every binding
//! lives in one table keyed by `(Mode, KeyPress)`. The editor asks the table
//! what a key means in the current mode and executes the answer. Insert mode
//! has one rule a table cannot express: any printable key types itself.

use std::collections::HashMap;

use crate::command::Command;
use crate::config::Config;
use crate::editor::Mode;

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
    };

    /// Ctrl modifier.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
    };

    /// Alt modifier.
    pub const ALT: Modifiers = Modifiers {
        ctrl: false,
        alt: true,
    };

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt
    }

    /// Parses modifiers from a string like "ctrl+alt".
    pub fn parse(s: &str) -> Self {
        let lower = s.to_lowercase();
        Modifiers {
            ctrl: lower.contains("ctrl") || lower.contains("control"),
            alt: lower.contains("alt") || lower.contains("option"),
        }
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code.
///
/// Shift is folded into `Char`: `A` arrives as `Char('A')`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

impl Key {
    /// Parses a key from a string such as `"esc"`, `"f5"` or `"$"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Key::Char(c));
        }

        let lower = s.to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "tab" => Some(Key::Tab),
            "backspace" | "bs" => Some(Key::Backspace),
            "delete" | "del" => Some(Key::Delete),
            "escape" | "esc" => Some(Key::Escape),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "pageup" | "pgup" => Some(Key::PageUp),
            "pagedown" | "pgdn" => Some(Key::PageDown),
            "insert" | "ins" => Some(Key::Insert),
            "space" => Some(Key::Char(' ')),
            _ if lower.starts_with('f') && lower.len() <= 3 => {
                lower[1..].parse().ok().map(Key::F)
            }
            _ => None,
        }
    }

    /// Returns the byte this key types in insert mode, if any.
    ///
    /// Only printable ASCII qualifies; columns are byte offsets.
    pub fn printable_byte(&self) -> Option<u8> {
        match self {
            Key::Char(c) if c.is_ascii_graphic() || *c == ' ' => Some(*c as u8),
            _ => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(' ') => write!(f, "Space"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Enter => write!(f, "Enter"),
            Key::Tab => write!(f, "Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Delete"),
            Key::Escape => write!(f, "Escape"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Insert => write!(f, "Insert"),
            Key::F(n) => write!(f, "F{}", n),
        }
    }
}

/// A key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Creates a new key press.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed without modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Parses a binding string like `"w"`, `"ctrl+s"` or `"esc"`.
    pub fn parse(s: &str) -> Option<Self> {
        let (mod_str, key_str) = match s.rsplit_once('+') {
            Some((mods, key)) if !key.is_empty() => (mods, key),
            _ => ("", s),
        };
        let key = Key::parse(key_str)?;
        let modifiers = Modifiers::parse(mod_str);
        Some(Self { key, modifiers })
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// A key binding maps a key in one mode to a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: KeyPress,
    pub command: Command,
    pub mode: Mode,
}

impl KeyBinding {
    /// Creates a binding for an unmodified character key.
    pub fn char(c: char, command: Command, mode: Mode) -> Self {
        Self {
            key: KeyPress::plain(Key::Char(c)),
            command,
            mode,
        }
    }
}

/// Keyboard mapping configuration.
#[derive(Debug, Clone)]
pub struct Keymap {
    table: HashMap<(Mode, KeyPress), Command>,
}

impl Keymap {
    /// Creates a keymap with the default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            table: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap
    }

    /// Creates a keymap from configuration.
    ///
    /// User bindings apply to visual mode and override defaults on the same
    /// key. Unknown keys or command names are logged and skipped.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();

        for (key_str, cmd_str) in &config.keyboard.bindings {
            let Some(key) = KeyPress::parse(key_str) else {
                tracing::warn!("Ignoring binding with unknown key: {:?}", key_str);
                continue;
            };
            let Some(command) = Command::from_name(cmd_str) else {
                tracing::warn!("Ignoring binding {:?} to unknown command {:?}", key_str, cmd_str);
                continue;
            };
            tracing::debug!("Binding {} to {}", key, command.display_name());
            keymap.add_binding(KeyBinding {
                key,
                command,
                mode: Mode::Visual,
            });
        }

        keymap
    }

    /// Adds default key bindings.
    fn add_default_bindings(&mut self) {
        use crate::command::Command::*;
        use Mode::{Insert, Visual};

        let visual = [
            ('h', MoveLeft),
            ('j', MoveDown),
            ('k', MoveUp),
            ('l', MoveRight),
            ('^', MoveToLineStart),
            ('$', MoveToLineEnd),
            ('i', EnterInsertMode),
            ('a', Append),
            ('A', AppendAtLineEnd),
            ('s', Save),
            ('q', Quit),
        ];
        for (c, command) in visual {
            self.add_binding(KeyBinding::char(c, command, Visual));
        }

        let insert = [
            (Key::Escape, EnterVisualMode),
            (Key::Backspace, DeleteBackward),
            (Key::Enter, SplitLine),
        ];
        for (key, command) in insert {
            self.add_binding(KeyBinding {
                key: KeyPress::plain(key),
                command,
                mode: Insert,
            });
        }
    }

    /// Resolves a key in `mode` to a command.
    ///
    /// Returns `None` for keys that mean nothing in this mode.
    pub fn resolve(&self, mode: Mode, key: &KeyPress) -> Option<Command> {
        if let Some(command) = self.table.get(&(mode, *key)) {
            return Some(*command);
        }
        match mode {
            Mode::Insert if key.modifiers.is_empty() => {
                key.key.printable_byte().map(Command::InsertChar)
            }
            _ => None,
        }
    }

    /// Adds a binding, replacing any existing one for the same key and mode.
    pub fn add_binding(&mut self, binding: KeyBinding) {
        self.table
            .insert((binding.mode, binding.key), binding.command);
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
