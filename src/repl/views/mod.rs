//! # Views Module
//!
//! Rendering of the input line onto the terminal.

pub mod redraw;

pub use redraw::{render_diff, LineRenderer, RenderState, BACKSPACE, BELL};
