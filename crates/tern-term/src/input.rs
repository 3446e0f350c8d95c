//! Keyboard input from the terminal.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tern_core::{Key, KeyPress, KeySource, Modifiers};

/// Blocking key source reading crossterm events from stdin.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyPress>> {
        next_key_from(event::read)
    }
}

/// Reads events until one translates to a key press.
///
/// End of input is `Ok(None)`, not an error.
fn next_key_from(mut read: impl FnMut() -> io::Result<Event>) -> io::Result<Option<KeyPress>> {
    loop {
        match read() {
            Ok(Event::Key(key_event)) => {
                if let Some(key) = translate(key_event) {
                    return Ok(Some(key));
                }
                tracing::trace!("Ignoring key event {:?}", key_event);
            }
            Ok(other) => tracing::trace!("Ignoring event {:?}", other),
            Err(e) if is_end_of_input(&e) => {
                tracing::info!("Terminal input closed: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        }
    }
}

fn is_end_of_input(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe
    )
}

/// Converts a crossterm key event into a key press.
///
/// Releases and repeats are dropped. Shift is already part of the character
/// and is not kept as a modifier.
pub fn translate(event: KeyEvent) -> Option<KeyPress> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };

    let modifiers = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
    };

    Some(KeyPress::new(key, modifiers))
}
