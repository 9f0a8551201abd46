//! # Escape Tables
//!
//! Platform key encodings expressed as data: each table maps complete byte
//! sequences to logical keys. The decoder never branches on the platform; it
//! only asks the selected table whether a partial sequence is still pending
//! and what a complete sequence means.

use super::types::KeyEvent;

/// Mapping of raw byte sequences to logical keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeTable {
    name: &'static str,
    bindings: Vec<(Vec<u8>, KeyEvent)>,
}

impl EscapeTable {
    /// Create a table from explicit bindings
    pub fn new(name: &'static str, bindings: Vec<(Vec<u8>, KeyEvent)>) -> Self {
        Self { name, bindings }
    }

    /// ANSI/VT encodings produced by Unix terminals in raw mode
    pub fn unix() -> Self {
        let bindings: &[(&[u8], KeyEvent)] = &[
            (b"\n", KeyEvent::Enter),
            (b"\r", KeyEvent::Enter),
            (b"\t", KeyEvent::Tab),
            (b"\x7f", KeyEvent::Backspace),
            (b"\x08", KeyEvent::Backspace),
            (b"\x03", KeyEvent::Interrupt),
            (b"\x1b[H", KeyEvent::Home),
            (b"\x1bOH", KeyEvent::Home),
            (b"\x1b[1~", KeyEvent::Home),
            (b"\x1b[F", KeyEvent::End),
            (b"\x1bOF", KeyEvent::End),
            (b"\x1b[4~", KeyEvent::End),
            (b"\x1b[D", KeyEvent::Left),
            (b"\x1bOD", KeyEvent::Left),
            (b"\x1b[1;5D", KeyEvent::CtrlLeft),
            (b"\x1b[C", KeyEvent::Right),
            (b"\x1bOC", KeyEvent::Right),
            (b"\x1b[1;5C", KeyEvent::CtrlRight),
            (b"\x1b[3~", KeyEvent::Delete),
        ];
        Self::from_static("unix", bindings)
    }

    /// Console encodings where extended keys are prefixed by `0xE0` or `0x00`
    pub fn windows() -> Self {
        let bindings: &[(&[u8], KeyEvent)] = &[
            (b"\r", KeyEvent::Enter),
            (b"\n", KeyEvent::Enter),
            (b"\t", KeyEvent::Tab),
            (b"\x08", KeyEvent::Backspace),
            (b"\x03", KeyEvent::Interrupt),
        ];
        let extended: &[(u8, KeyEvent)] = &[
            (b'G', KeyEvent::Home),
            (b'O', KeyEvent::End),
            (b'K', KeyEvent::Left),
            (b's', KeyEvent::CtrlLeft),
            (b'M', KeyEvent::Right),
            (b't', KeyEvent::CtrlRight),
            (b'S', KeyEvent::Delete),
        ];

        let mut table = Self::from_static("windows", bindings);
        for prefix in [0xe0u8, 0x00] {
            for (code, key) in extended {
                table.bindings.push((vec![prefix, *code], *key));
            }
        }
        table
    }

    /// Table for the platform this binary was built for
    pub fn for_platform() -> Self {
        if cfg!(windows) {
            Self::windows()
        } else {
            Self::unix()
        }
    }

    fn from_static(name: &'static str, bindings: &[(&[u8], KeyEvent)]) -> Self {
        Self::new(
            name,
            bindings
                .iter()
                .map(|(sequence, key)| (sequence.to_vec(), *key))
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn bindings(&self) -> &[(Vec<u8>, KeyEvent)] {
        &self.bindings
    }

    /// Key bound to a complete sequence
    pub fn lookup(&self, sequence: &[u8]) -> Option<KeyEvent> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound.as_slice() == sequence)
            .map(|(_, key)| *key)
    }

    /// Whether more bytes must be read before `sequence` can be decoded
    ///
    /// True when `sequence` is a strict prefix of a bound sequence, or an
    /// incomplete but so far valid UTF-8 encoding.
    pub fn is_pending(&self, sequence: &[u8]) -> bool {
        if sequence.is_empty() {
            return true;
        }

        let strict_prefix = self
            .bindings
            .iter()
            .any(|(bound, _)| bound.len() > sequence.len() && bound.starts_with(sequence));

        strict_prefix || is_incomplete_utf8(sequence)
    }
}

impl Default for EscapeTable {
    fn default() -> Self {
        Self::for_platform()
    }
}

/// A truncated UTF-8 encoding: invalid only because bytes are missing at the end
fn is_incomplete_utf8(sequence: &[u8]) -> bool {
    matches!(std::str::from_utf8(sequence), Err(e) if e.error_len().is_none())
}
