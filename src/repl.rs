//! # REPL Module
//!
//! Interactive line-editing command shell, leaves first:
//!
//! - **events**: raw input bytes to logical keys
//! - **models**: the editable input line
//! - **views**: incremental line redraw
//! - **commands**: command trait, registry, option parser, built-ins
//! - **autocomplete**: TAB completion candidates and planning
//! - **session**: the prompt → read → execute loop
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐  keys  ┌──────────────┐ bytes ┌──────────────┐
//! │  KeyDecoder  │───────▶│  LineBuffer  │──────▶│ LineRenderer │
//! └──────────────┘        └──────────────┘       └──────────────┘
//!        ▲                   TAB │  ENTER
//!        │ ByteSource            ▼
//! ┌──────────────┐        ┌──────────────┐       ┌──────────────┐
//! │    Shell     │───────▶│ Autocomplete │──────▶│   Registry   │
//! │ (session)    │───────────────────────────────▶│   Command    │
//! └──────────────┘                               └──────────────┘
//! ```

pub mod autocomplete;
pub mod commands;
pub mod console;
pub mod events;
pub mod io;
pub mod models;
pub mod session;
pub mod text;
pub mod views;

// Re-export main types for convenience
pub use autocomplete::{plan_completion, tokenize, Completion};
pub use commands::{
    Arity, Command, CommandArc, CommandGroup, CommandRegistry, OptionSpec, OptionTable,
    OptionValue, ParsedElement, ParsedOptions,
};
pub use console::Console;
pub use events::{EscapeTable, KeyDecoder, KeyEvent};
pub use models::{EditOutcome, LineBuffer};
pub use session::{ReadOutcome, Shell, ShellBuilder};
pub use text::PrintStyle;
