//! # I/O Abstraction Layer
//!
//! Trait abstractions for the shell's input and output streams, so the whole
//! session can be driven without a terminal.
//!
//! - **ByteSource**: blocking source of raw input bytes
//! - **RenderStream**: byte output plus the terminal controls the shell needs
//!   (raw mode and width)
//!
//! ```text
//! Production:  Shell ──▶ TerminalByteSource   ──▶ stdin
//!                    ──▶ TerminalRenderStream ──▶ crossterm (raw mode, size) + stdout
//!
//! Testing:     Shell ──▶ MockByteSource       ──▶ VecDeque<u8>
//!                    ──▶ MockRenderStream     ──▶ Vec<RenderCommand>
//! ```

use anyhow::Result;
use std::io::Write;

pub mod mock;
pub mod terminal;

pub use mock::{MockByteSource, MockRenderStream, RenderCommand, RenderRecorder, SharedWriter};
pub use terminal::{TerminalByteSource, TerminalRenderStream};

/// Type alias for terminal size (width, height)
pub type TerminalSize = (u16, u16);

/// Blocking source of raw input bytes
pub trait ByteSource: Send {
    /// Block until the next byte is available
    ///
    /// Returns `None` once the source is exhausted.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

/// Output render stream abstraction
///
/// Line editing only ever writes printable text, backspaces, spaces, bells
/// and line breaks; no cursor addressing is required from implementations.
pub trait RenderStream: Write + Send {
    /// Get terminal size as (width, height)
    fn get_size(&self) -> Result<TerminalSize>;

    /// Disable canonical mode and echo
    fn enable_raw_mode(&mut self) -> Result<()>;

    /// Restore the settings saved by `enable_raw_mode`
    fn disable_raw_mode(&mut self) -> Result<()>;
}
