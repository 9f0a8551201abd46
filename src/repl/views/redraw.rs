//! # Redraw Engine
//!
//! Repaints the input line after each edit using only backspace, overwrite
//! and space bytes. The renderer remembers what it painted last so it can
//! rewind to the first changed column instead of the start of the line.
//!
//! After every redraw the terminal cursor sits at the buffer cursor and the
//! visible line equals the buffer text.

use crate::repl::models::LineBuffer;

/// Moves the terminal cursor one column left
pub const BACKSPACE: char = '\x08';

/// Terminal bell
pub const BELL: &str = "\x07";

/// Shape of the last painted line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub last_cursor: usize,
    pub last_text: Vec<char>,
}

/// Incremental line painter, scoped to one line read
#[derive(Debug, Clone, Default)]
pub struct LineRenderer {
    state: RenderState,
}

impl LineRenderer {
    /// Renderer for a line starting empty at the current terminal column
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Bytes turning the last painted line into `buffer`
    pub fn redraw(&mut self, buffer: &LineBuffer) -> String {
        let output = render_diff(&self.state, buffer.chars(), buffer.cursor());
        self.state = RenderState {
            last_cursor: buffer.cursor(),
            last_text: buffer.chars().to_vec(),
        };
        output
    }
}

/// Redraw bytes from `state` to `text` with the cursor at `cursor`
pub fn render_diff(state: &RenderState, text: &[char], cursor: usize) -> String {
    let old_len = state.last_text.len();
    let start = common_prefix(&state.last_text, text).min(state.last_cursor);

    let mut output = String::new();
    push_backspaces(&mut output, state.last_cursor - start);
    output.extend(&text[start..]);

    if text.len() < old_len {
        let stale = old_len - text.len();
        output.extend(std::iter::repeat(' ').take(stale));
        push_backspaces(&mut output, stale);
    }

    push_backspaces(&mut output, text.len() - cursor);
    output
}

fn push_backspaces(output: &mut String, count: usize) {
    output.extend(std::iter::repeat(BACKSPACE).take(count));
}

fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
