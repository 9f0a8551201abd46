//! # Mock I/O Implementations for Testing
//!
//! Provides mock implementations of ByteSource and RenderStream traits
//! for driving a shell without terminal dependencies.

use super::{ByteSource, RenderStream, TerminalSize};
use anyhow::Result;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock byte source for testing
///
/// Provides pre-programmed input bytes; exhausted once they are consumed.
#[derive(Debug, Default)]
pub struct MockByteSource {
    bytes: VecDeque<u8>,
}

impl MockByteSource {
    /// Create a new mock source with pre-programmed bytes
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: bytes.as_ref().iter().copied().collect(),
        }
    }

    /// Queue more bytes at the end of the stream
    pub fn push_bytes(&mut self, bytes: impl AsRef<[u8]>) {
        self.bytes.extend(bytes.as_ref().iter().copied());
    }

    /// Number of bytes not yet read
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl ByteSource for MockByteSource {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.bytes.pop_front())
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    GetSize,
    EnableRawMode,
    DisableRawMode,
    Write(Vec<u8>),
    Flush,
}

/// Type alias for command history
type CommandHistory = Arc<Mutex<Vec<RenderCommand>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock render stream for testing
///
/// Records all rendering commands. The stream is usually moved into a shell,
/// so inspection goes through a [`RenderRecorder`] obtained beforehand.
pub struct MockRenderStream {
    commands: CommandHistory,
    terminal_size: TerminalSize,
    raw_mode: bool,
}

impl MockRenderStream {
    /// Create a new mock render stream
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    /// Create a mock render stream with specific terminal size
    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            terminal_size: size,
            raw_mode: false,
        }
    }

    /// Handle sharing this stream's recorded commands
    pub fn recorder(&self) -> RenderRecorder {
        RenderRecorder {
            commands: Arc::clone(&self.commands),
        }
    }

    /// Whether raw mode is currently enabled
    pub fn is_raw(&self) -> bool {
        self.raw_mode
    }

    fn record(&self, command: RenderCommand) {
        lock(&self.commands).push(command);
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.record(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn get_size(&self) -> Result<TerminalSize> {
        self.record(RenderCommand::GetSize);
        Ok(self.terminal_size)
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::EnableRawMode);
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::DisableRawMode);
        self.raw_mode = false;
        Ok(())
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

/// Read access to the commands recorded by a [`MockRenderStream`]
#[derive(Debug, Clone)]
pub struct RenderRecorder {
    commands: CommandHistory,
}

impl RenderRecorder {
    /// Get recorded commands for verification
    pub fn get_commands(&self) -> Vec<RenderCommand> {
        lock(&self.commands).clone()
    }

    /// Clear recorded commands
    pub fn clear_commands(&self) {
        lock(&self.commands).clear();
    }

    /// Check if a specific command was recorded
    pub fn has_command(&self, command: &RenderCommand) -> bool {
        lock(&self.commands).contains(command)
    }

    /// All written bytes, in order
    pub fn output_bytes(&self) -> Vec<u8> {
        lock(&self.commands)
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Write(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// All written bytes as a string
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output_bytes()).to_string()
    }
}

/// Cloneable in-memory writer, used to capture the error stream
#[derive(Debug, Clone, Default)]
pub struct SharedWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as a string
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.buffer)).to_string()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        lock(&self.buffer).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
