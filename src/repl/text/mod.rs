//! # Text Module
//!
//! Character-level helpers shared by the line editor and the console.

pub mod layout;
pub mod word_boundary;

pub use layout::{format_columns, justify, pad_right, wrap_message, PrintStyle};
pub use word_boundary::{is_separator, next_word_end, previous_word_start, WORD_SEPARATORS};
