//! # Escape Decoder
//!
//! Turns raw input bytes into logical key events. Bytes are accumulated one at
//! a time while the escape table reports the sequence as pending; the first
//! byte that makes it stop pending completes the sequence.
//!
//! A complete sequence decodes to the key bound in the table, or else to a
//! printable character when it is exactly one valid UTF-8 character. Anything
//! else is dropped and reading resumes.

use super::{escape_table::EscapeTable, types::KeyEvent};
use crate::repl::io::ByteSource;
use anyhow::Result;

/// Decoder reading logical keys from a byte source
#[derive(Debug, Clone, Default)]
pub struct KeyDecoder {
    table: EscapeTable,
}

impl KeyDecoder {
    pub fn new(table: EscapeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &EscapeTable {
        &self.table
    }

    /// Decode one complete sequence
    pub fn decode(&self, sequence: &[u8]) -> Option<KeyEvent> {
        if let Some(key) = self.table.lookup(sequence) {
            return Some(key);
        }

        let text = std::str::from_utf8(sequence).ok()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_control() => Some(KeyEvent::Char(ch)),
            _ => None,
        }
    }

    /// Read bytes until the sequence is complete
    ///
    /// Returns `None` when the source ends, dropping any partial sequence.
    pub fn read_sequence(&self, source: &mut dyn ByteSource) -> Result<Option<Vec<u8>>> {
        let mut sequence = Vec::new();

        while self.table.is_pending(&sequence) {
            match source.read_byte()? {
                Some(byte) => sequence.push(byte),
                None => {
                    if !sequence.is_empty() {
                        tracing::debug!("Input ended inside sequence {:02x?}", sequence);
                    }
                    return Ok(None);
                }
            }
        }

        Ok(Some(sequence))
    }

    /// Read the next logical key, skipping undecodable sequences
    ///
    /// Returns `None` when the source ends.
    pub fn read_key(&self, source: &mut dyn ByteSource) -> Result<Option<KeyEvent>> {
        while let Some(sequence) = self.read_sequence(source)? {
            match self.decode(&sequence) {
                Some(key) => return Ok(Some(key)),
                None => tracing::debug!("Dropping unmapped sequence {:02x?}", sequence),
            }
        }
        Ok(None)
    }
}

/// Hex rendering of a raw sequence, e.g. `1b 5b 44`
pub fn format_sequence(sequence: &[u8]) -> String {
    sequence
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
