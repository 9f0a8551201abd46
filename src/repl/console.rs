//! # Console
//!
//! User-facing output sink of a shell session. Wraps the render stream (line
//! editing, messages) and the error stream, and filters informational
//! messages by verbosity.
//!
//! Every message is mirrored to `tracing` at debug level; the terminal only
//! ever sees the formatted text.

use crate::repl::io::RenderStream;
use crate::repl::text::{wrap_message, PrintStyle};
use anyhow::Result;
use std::io::Write;

/// Only errors and level 0 messages
pub const QUIET: u8 = 0;
/// Regular user messages
pub const NORMAL: u8 = 1;
/// Debug messages meant for users
pub const USER_DEBUG: u8 = 2;
/// Internal shell messages (command loading, aliases)
pub const SHELL_DEBUG: u8 = 3;

const LOG_MARKER: &str = "[*]";
const WARN_MARKER: &str = "[!]";
const MARKER_PAD: usize = 4;

/// Output sink with verbosity filtering and paragraph layout
pub struct Console {
    out: Box<dyn RenderStream>,
    err: Box<dyn Write + Send>,
    verbosity: u8,
    width: usize,
    raw_mode: bool,
}

impl Console {
    pub fn new(
        out: Box<dyn RenderStream>,
        err: Box<dyn Write + Send>,
        verbosity: u8,
        width: usize,
    ) -> Self {
        Self {
            out,
            err,
            verbosity,
            width,
            raw_mode: false,
        }
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Layout width used by [`Console::print`]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Current terminal width, or the layout width when it is unknown
    pub fn terminal_width(&self) -> usize {
        match self.out.get_size() {
            Ok((width, _)) if width > 0 => usize::from(width),
            _ => self.width,
        }
    }

    /// Line break for the current terminal mode
    ///
    /// Raw mode disables output post-processing, so the carriage return must
    /// be written explicitly.
    pub fn newline(&self) -> &'static str {
        if self.raw_mode {
            "\r\n"
        } else {
            "\n"
        }
    }

    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    pub fn enable_raw_mode(&mut self) -> Result<()> {
        self.out.enable_raw_mode()?;
        self.raw_mode = true;
        Ok(())
    }

    pub fn disable_raw_mode(&mut self) -> Result<()> {
        self.raw_mode = false;
        self.out.disable_raw_mode()
    }

    /// Print a message laid out with `style`, returning the number of lines
    pub fn print(&mut self, message: &str, style: &PrintStyle) -> usize {
        let lines = wrap_message(message, self.width, style);
        let newline = self.newline();

        let mut text = String::new();
        for line in &lines {
            text.push_str(line);
            text.push_str(newline);
        }
        self.write_raw(&text);

        lines.len()
    }

    /// Print a message without any gutter
    pub fn println(&mut self, message: &str) -> usize {
        self.print(message, &PrintStyle::default())
    }

    /// Informational message, shown when `level <= verbosity`
    pub fn log(&mut self, message: &str, level: u8) {
        tracing::debug!(level, "log: {}", message);
        if level <= self.verbosity {
            self.print(message, &PrintStyle::with_left_text(LOG_MARKER, MARKER_PAD));
        }
    }

    /// Warning message, shown when `level <= verbosity`
    pub fn warn(&mut self, message: &str, level: u8) {
        tracing::debug!(level, "warn: {}", message);
        if level <= self.verbosity {
            self.print(message, &PrintStyle::with_left_text(WARN_MARKER, MARKER_PAD));
        }
    }

    /// Error message on the error stream, shown at every verbosity
    pub fn error(&mut self, message: &str) {
        tracing::debug!("error: {}", message);
        let line = format!("{} {}{}", WARN_MARKER, message, self.newline());
        if let Err(e) = self.err.write_all(line.as_bytes()).and_then(|_| self.err.flush()) {
            tracing::warn!("Failed to write error message: {}", e);
        }
    }

    /// Write text to the terminal as is
    pub fn write_raw(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }

    /// Ring the terminal bell
    pub fn beep(&mut self) {
        self.write_raw(crate::repl::views::BELL);
    }

    pub fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!("Failed to flush terminal: {}", e);
        }
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("verbosity", &self.verbosity)
            .field("width", &self.width)
            .field("raw_mode", &self.raw_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::io::{MockRenderStream, RenderCommand, RenderRecorder, SharedWriter};

    fn console(verbosity: u8) -> (Console, RenderRecorder, SharedWriter) {
        let out = MockRenderStream::with_size((40, 10));
        let recorder = out.recorder();
        let err = SharedWriter::new();
        let console = Console::new(Box::new(out), Box::new(err.clone()), verbosity, 20);
        (console, recorder, err)
    }

    #[test]
    fn log_should_respect_verbosity() {
        let (mut console, recorder, _) = console(NORMAL);

        console.log("shown", NORMAL);
        console.log("hidden", SHELL_DEBUG);

        assert_eq!(recorder.output_string(), "[*] shown\n");
    }

    #[test]
    fn warn_should_use_warning_marker() {
        let (mut console, recorder, _) = console(QUIET);

        console.warn("careful", QUIET);

        assert_eq!(recorder.output_string(), "[!] careful\n");
    }

    #[test]
    fn error_should_go_to_error_stream_at_any_verbosity() {
        let (mut console, recorder, err) = console(QUIET);

        console.error("broken");

        assert_eq!(err.contents(), "[!] broken\n");
        assert_eq!(recorder.output_string(), "");
    }

    #[test]
    fn print_should_return_number_of_lines() {
        let (mut console, recorder, _) = console(NORMAL);

        let count = console.print(
            "one two three four five six",
            &PrintStyle {
                justify: false,
                ..PrintStyle::default()
            },
        );

        assert_eq!(count, 2);
        assert_eq!(recorder.output_string(), "one two three four\nfive six\n");
    }

    #[test]
    fn newline_should_follow_raw_mode() {
        let (mut console, recorder, _) = console(NORMAL);

        console.enable_raw_mode().unwrap();
        console.println("raw");
        console.disable_raw_mode().unwrap();
        console.println("cooked");

        assert_eq!(recorder.output_string(), "raw\r\ncooked\n");
        assert!(recorder.has_command(&RenderCommand::EnableRawMode));
        assert!(recorder.has_command(&RenderCommand::DisableRawMode));
    }

    #[test]
    fn terminal_width_should_come_from_render_stream() {
        let (console, _, _) = console(NORMAL);

        assert_eq!(console.terminal_width(), 40);
        assert_eq!(console.width(), 20);
    }
}
