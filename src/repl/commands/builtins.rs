//! # Built-in Commands
//!
//! `exit` and `help`, registered in every shell and command group before any
//! user command.

use super::command::{describe, describe_long, Command};
use crate::repl::session::Shell;
use crate::repl::text::PrintStyle;
use unicode_width::UnicodeWidthStr;

/// Columns between the longest command name and the descriptions
const NAME_GAP: usize = 5;

/// Ends the current session
#[derive(Debug, Clone, Copy, Default)]
pub struct Exit;

impl Command for Exit {
    fn name(&self) -> &str {
        "exit"
    }

    fn aliases(&self) -> Vec<String> {
        vec!["quit".to_string()]
    }

    fn run(&self, shell: &mut Shell, _args: &[String]) -> i32 {
        shell.exit();
        0
    }
}

/// Lists the commands, or shows the long description of one
#[derive(Debug, Clone, Copy, Default)]
pub struct Help;

impl Help {
    fn list_commands(&self, shell: &mut Shell) -> i32 {
        let registry = shell.registry();
        let language = shell.language();

        let heading = format!("{}\n", language.lookup("help", "commands_list"));
        shell.print(&heading, &PrintStyle::indented(1));

        let name_width = registry
            .names()
            .iter()
            .map(|name| name.width())
            .max()
            .unwrap_or(0)
            + NAME_GAP;
        let aliases_label = language.lookup("help", "aliases");

        for command in registry.commands() {
            let name = command.name();
            let mut lines = shell.print(
                &describe(command.as_ref(), &language),
                &PrintStyle::with_left_text(format!(" {name}"), name_width),
            );

            let aliases = registry.aliases_of(name);
            if !aliases.is_empty() {
                let title = format!("{}{} ", " ".repeat(name_width), aliases_label);
                let lpad = title.width();
                lines += shell.print(&aliases.join(", "), &PrintStyle::with_left_text(title, lpad));
            }

            if lines > 1 {
                shell.println("");
            }
        }
        0
    }

    fn describe_command(&self, shell: &mut Shell, typed: &str) -> i32 {
        let registry = shell.registry();
        let language = shell.language();

        let Some(command) = registry.resolve(typed) else {
            let message = language.format("help", "unknown_command", &[&typed]);
            shell.error(&message, 0);
            return 1;
        };

        let heading = if command.name() == typed {
            language.format("help", "help_of_command", &[&typed])
        } else {
            language.format("help", "help_of_alias", &[&typed, &command.name()])
        };
        shell.print(&heading, &PrintStyle::indented(1));
        shell.println("");
        shell.print(
            &describe_long(command.as_ref(), &language),
            &PrintStyle::indented(2),
        );
        0
    }
}

impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn run(&self, shell: &mut Shell, args: &[String]) -> i32 {
        match args.get(1) {
            Some(typed) => self.describe_command(shell, typed),
            None => self.list_commands(shell),
        }
    }

    fn autocomplete(&self, shell: &mut Shell, args: &[String]) -> Vec<String> {
        match args {
            [_, typed] => shell
                .registry()
                .complete(typed)
                .into_iter()
                .filter(|name| name != self.name())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::session::testing::mock_shell;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn exit_should_stop_the_session() {
        let (mut shell, _, _) = mock_shell(Shell::builder("beer"), b"");
        shell.set_running(true);

        assert_eq!(Exit.run(&mut shell, &args(&["quit"])), 0);
        assert!(!shell.is_running());
    }

    #[test]
    fn help_should_list_commands_with_aliases() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"");

        assert_eq!(Help.run(&mut shell, &args(&["help"])), 0);

        assert_eq!(
            recorder.output_string(),
            concat!(
                " List of available commands:\n",
                "\n",
                " exit    Exits the current shell.\n",
                "         Aliases: quit\n",
                "\n",
                " help    Shows the available commands, or the help of one command.\n",
            )
        );
    }

    #[test]
    fn help_should_name_the_target_of_an_alias() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"");

        assert_eq!(Help.run(&mut shell, &args(&["help", "quit"])), 0);

        let output = recorder.output_string();
        assert!(output.starts_with(" Help of \"quit\" (alias of \"exit\"):\n\n  Ends"));
    }

    #[test]
    fn help_should_report_unknown_commands() {
        let (mut shell, recorder, errors) = mock_shell(Shell::builder("beer"), b"");

        assert_eq!(Help.run(&mut shell, &args(&["help", "nope"])), 1);

        assert_eq!(errors.contents(), "[!] Unknown command \"nope\".\n");
        assert_eq!(recorder.output_string(), "");
    }

    #[test]
    fn help_should_complete_other_command_names() {
        let (mut shell, _, _) = mock_shell(Shell::builder("beer"), b"");

        assert_eq!(Help.autocomplete(&mut shell, &args(&["help", ""])), args(&["exit", "quit"]));
        assert_eq!(Help.autocomplete(&mut shell, &args(&["help", "e"])), args(&["exit"]));
        assert!(Help.autocomplete(&mut shell, &args(&["help", "h"])).is_empty());
        assert!(Help
            .autocomplete(&mut shell, &args(&["help", "exit", ""]))
            .is_empty());
    }
}
