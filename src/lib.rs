//! # beershell - Interactive Line-Editing Command Shell
//!
//! A terminal command shell reading raw keystrokes, editing the input line
//! in place, completing commands and their arguments on TAB and dispatching
//! lines to registered commands through an alias-aware registry.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  bytes  ┌──────────────┐  lines  ┌──────────────┐
//! │  Terminal   │────────▶│    Shell     │────────▶│   Commands   │
//! │             │◀────────│              │◀────────│              │
//! │ - Raw mode  │ redraw  │ - Line edit  │  output │ - Registry   │
//! │ - Width     │         │ - Completion │         │ - Options    │
//! └─────────────┘         └──────────────┘         └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod i18n;
pub mod repl;

// Re-export main types for easy access
pub use i18n::Language;
pub use repl::*;
