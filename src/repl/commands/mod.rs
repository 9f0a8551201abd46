//! # Commands
//!
//! The command capability and everything that dispatches to it:
//!
//! - **command**: the `Command` trait and description helpers
//! - **registry**: name and alias resolution
//! - **options**: argument parsing for command implementations
//! - **builtins**: `exit` and `help`
//! - **group**: commands with their own nested registry

pub mod builtins;
pub mod command;
pub mod group;
pub mod options;
pub mod registry;

pub use builtins::{Exit, Help};
pub use command::{describe, describe_long, Command, CommandArc};
pub use group::CommandGroup;
pub use options::{
    flag_name, is_flag_shaped, Arity, OptionSpec, OptionTable, OptionValue, ParsedElement,
    ParsedOptions,
};
pub use registry::{CommandRegistry, RegistryEntry, RegistryNotice};
