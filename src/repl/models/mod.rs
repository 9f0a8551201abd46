//! # Models Module
//!
//! State owned by the input loop while a line is being read.

pub mod line_buffer;

pub use line_buffer::{EditOutcome, LineBuffer};
