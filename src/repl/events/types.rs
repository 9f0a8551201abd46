//! Logical key events produced by the escape decoder

use std::fmt;

/// A decoded logical key, independent of its raw byte encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Printable character
    Char(char),
    Enter,
    Backspace,
    Delete,
    Home,
    End,
    Left,
    CtrlLeft,
    Right,
    CtrlRight,
    Tab,
    /// Ctrl+C as delivered in raw mode
    Interrupt,
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Char(ch) => write!(f, "'{ch}'"),
            KeyEvent::Enter => f.write_str("ENTER"),
            KeyEvent::Backspace => f.write_str("BACKSPACE"),
            KeyEvent::Delete => f.write_str("DELETE"),
            KeyEvent::Home => f.write_str("HOME"),
            KeyEvent::End => f.write_str("END"),
            KeyEvent::Left => f.write_str("LEFT"),
            KeyEvent::CtrlLeft => f.write_str("CTRL_LEFT"),
            KeyEvent::Right => f.write_str("RIGHT"),
            KeyEvent::CtrlRight => f.write_str("CTRL_RIGHT"),
            KeyEvent::Tab => f.write_str("TAB"),
            KeyEvent::Interrupt => f.write_str("INTERRUPT"),
        }
    }
}
