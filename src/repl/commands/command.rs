//! # Command Capability
//!
//! Commands are stateless objects owned by a registry for the lifetime of a
//! shell. They receive the invoking shell explicitly on every call.

use crate::i18n::Language;
use crate::repl::session::Shell;
use std::sync::Arc;

/// Shared handle to a registered command
pub type CommandArc = Arc<dyn Command>;

/// A shell command
///
/// `args[0]` is always the name the command was invoked with, which may be
/// an alias.
pub trait Command: Send + Sync {
    /// Registry name of the command
    fn name(&self) -> &str;

    /// Alternative names bound to this command at registration
    fn aliases(&self) -> Vec<String> {
        Vec::new()
    }

    /// Localization section holding the command's texts
    fn i18n_owner(&self) -> &str {
        self.name()
    }

    /// Short description, possibly empty
    fn description(&self, language: &Language) -> String {
        language.lookup(self.i18n_owner(), "description")
    }

    /// Long description, possibly empty
    fn long_description(&self, language: &Language) -> String {
        language.lookup(self.i18n_owner(), "long_description")
    }

    /// Run the command and return its exit code
    fn run(&self, shell: &mut Shell, args: &[String]) -> i32;

    /// Completion candidates for the last argument
    ///
    /// `args` ends with an empty string when the user is about to start a
    /// new argument. `shell` is scoped the way `run` would see it.
    fn autocomplete(&self, shell: &mut Shell, args: &[String]) -> Vec<String> {
        let _ = (shell, args);
        Vec::new()
    }
}

/// Short description, or the localized placeholder when there is none
pub fn describe(command: &dyn Command, language: &Language) -> String {
    let description = command.description(language);
    if description.is_empty() {
        language.lookup("Shell", "no_description")
    } else {
        description
    }
}

/// Long description, falling back to the short one
pub fn describe_long(command: &dyn Command, language: &Language) -> String {
    let long_description = command.long_description(language);
    if long_description.is_empty() {
        describe(command, language)
    } else {
        long_description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl Command for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn run(&self, _shell: &mut Shell, _args: &[String]) -> i32 {
            0
        }
    }

    struct Documented;

    impl Command for Documented {
        fn name(&self) -> &str {
            "documented"
        }

        fn i18n_owner(&self) -> &str {
            "docs"
        }

        fn run(&self, _shell: &mut Shell, _args: &[String]) -> i32 {
            0
        }
    }

    #[test]
    fn describe_should_fall_back_to_placeholder() {
        let language = Language::builtin();

        assert_eq!(describe(&Silent, &language), "No description available.");
        assert_eq!(describe_long(&Silent, &language), "No description available.");
    }

    #[test]
    fn describe_long_should_fall_back_to_short_description() {
        let mut language = Language::builtin();
        language
            .load_str("[docs]\ndescription = Short text.\n")
            .unwrap();

        assert_eq!(describe(&Documented, &language), "Short text.");
        assert_eq!(describe_long(&Documented, &language), "Short text.");
    }

    #[test]
    fn describe_should_use_localized_texts() {
        let language = Language::builtin();
        let exit = crate::repl::commands::Exit;

        assert_eq!(describe(&exit, &language), "Exits the current shell.");
        assert!(describe_long(&exit, &language).starts_with("Ends the current shell session."));
    }
}
