//! # Input Events
//!
//! Decoding of raw terminal input into logical keys:
//!
//! - **types**: the `KeyEvent` vocabulary
//! - **escape_table**: per-platform byte sequence bindings
//! - **decoder**: the byte accumulation loop

pub mod decoder;
pub mod escape_table;
pub mod types;

pub use decoder::{format_sequence, KeyDecoder};
pub use escape_table::EscapeTable;
pub use types::KeyEvent;
