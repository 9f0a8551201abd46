//! # Terminal I/O Implementations
//!
//! Production implementations of I/O abstractions using stdin/stdout and
//! crossterm. All crossterm dependencies are isolated to this module.

use super::{ByteSource, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::{execute, terminal};
use std::io::{self, Read, Write};

/// Byte source reading stdin one byte at a time
pub struct TerminalByteSource {
    stdin: io::Stdin,
}

impl TerminalByteSource {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl ByteSource for TerminalByteSource {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.stdin.lock().read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Terminal-based render stream using crossterm
///
/// Raw mode is only toggled when stdin is a terminal; piped input is read as
/// is. Raw mode still enabled when the stream is dropped is restored.
pub struct TerminalRenderStream<W: Write> {
    writer: W,
    is_terminal: bool,
    raw_mode: bool,
}

impl TerminalRenderStream<io::Stdout> {
    /// Create a new terminal render stream using stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TerminalRenderStream<W> {
    /// Create a terminal render stream with custom writer
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            is_terminal: atty::is(atty::Stream::Stdin),
            raw_mode: false,
        }
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(text) = std::str::from_utf8(buf) {
            execute!(self.writer, crossterm::style::Print(text))?;
            Ok(buf.len())
        } else {
            // Fallback for non-UTF8 data
            self.writer.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write + Send> RenderStream for TerminalRenderStream<W> {
    fn get_size(&self) -> Result<TerminalSize> {
        terminal::size().map_err(anyhow::Error::from)
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        if self.is_terminal && !self.raw_mode {
            terminal::enable_raw_mode()?;
            self.raw_mode = true;
        }
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        if self.raw_mode {
            terminal::disable_raw_mode()?;
            self.raw_mode = false;
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalRenderStream<W> {
    fn drop(&mut self) {
        if self.raw_mode {
            if let Err(e) = terminal::disable_raw_mode() {
                tracing::warn!("Failed to restore terminal mode: {}", e);
            }
        }
    }
}

impl Default for TerminalByteSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for TerminalRenderStream<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}
