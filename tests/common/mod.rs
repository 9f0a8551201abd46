//! Shared fixtures for the shell integration tests
//!
//! A brewing themed command set driven over mock streams.

#![allow(dead_code)]

use std::sync::Arc;

use beershell::repl::io::{MockByteSource, MockRenderStream, RenderRecorder, SharedWriter};
use beershell::{
    Command, CommandGroup, EscapeTable, OptionSpec, OptionTable, ParsedElement, Shell,
    ShellBuilder,
};

pub const HOPS: &[&str] = &["Cascade", "Centennial", "Citra", "Saaz"];

/// Hop names starting with `prefix`, ignoring case
pub fn matching_hops(prefix: &str) -> Vec<String> {
    let prefix = prefix.to_lowercase();
    HOPS.iter()
        .filter(|hop| hop.to_lowercase().starts_with(&prefix))
        .map(|hop| hop.to_string())
        .collect()
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| token.to_string()).collect()
}

/// `hop <name>...`: prints the hops it was given
pub struct HopCommand;

impl Command for HopCommand {
    fn name(&self) -> &str {
        "hop"
    }

    fn run(&self, shell: &mut Shell, args: &[String]) -> i32 {
        let message = format!("Hops: {}", args[1..].join(", "));
        shell.println(&message);
        0
    }

    fn autocomplete(&self, _shell: &mut Shell, args: &[String]) -> Vec<String> {
        args.last().map(|last| matching_hops(last)).unwrap_or_default()
    }
}

/// `hopinfo <name>`: exits with the number of arguments
pub struct HopInfoCommand;

impl Command for HopInfoCommand {
    fn name(&self) -> &str {
        "hopinfo"
    }

    fn aliases(&self) -> Vec<String> {
        vec!["hi".to_string()]
    }

    fn run(&self, _shell: &mut Shell, args: &[String]) -> i32 {
        (args.len() - 1) as i32
    }
}

/// `list [--name <words>...] [--limit <n>] [--dry]`
pub struct ListCommand {
    options: OptionTable,
}

impl ListCommand {
    pub fn new() -> Self {
        Self {
            options: OptionTable::new()
                .with(OptionSpec::variadic("name"))
                .with(OptionSpec::single("limit"))
                .with(OptionSpec::flag("dry")),
        }
    }
}

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn run(&self, shell: &mut Shell, args: &[String]) -> i32 {
        let parsed = self.options.parse(args, shell);
        let message = format!(
            "name={} limit={} dry={} rest={}",
            parsed.text("name").unwrap_or("-"),
            parsed.text("limit").unwrap_or("-"),
            parsed.flag("dry"),
            parsed.positional().join(",")
        );
        shell.println(&message);
        0
    }

    fn autocomplete(&self, _shell: &mut Shell, args: &[String]) -> Vec<String> {
        let flags = self.options.complete_flag(args);
        if !flags.is_empty() {
            return flags;
        }

        // Hop names for the value being typed after --name
        let Some((last, previous)) = args.split_last() else {
            return Vec::new();
        };
        match self.options.parse_ordered(previous).last() {
            Some(ParsedElement::Option { name, .. }) if name == "name" => matching_hops(last),
            _ => Vec::new(),
        }
    }
}

pub fn brewing_builder() -> ShellBuilder {
    Shell::builder("beer")
        .command(Arc::new(HopCommand))
        .command(Arc::new(HopInfoCommand))
        .command(Arc::new(ListCommand::new()))
        .command(Arc::new(
            CommandGroup::new("yeast").command(Arc::new(HopCommand)),
        ))
}

/// Shell over mock streams fed with `input`
pub fn mock_shell(builder: ShellBuilder, input: &[u8]) -> (Shell, RenderRecorder, SharedWriter) {
    let output = MockRenderStream::new();
    let recorder = output.recorder();
    let errors = SharedWriter::new();
    let shell = builder.escape_table(EscapeTable::unix()).build(
        Box::new(MockByteSource::new(input)),
        Box::new(output),
        Box::new(errors.clone()),
    );
    (shell, recorder, errors)
}

pub fn brewing_shell(input: &[u8]) -> (Shell, RenderRecorder, SharedWriter) {
    mock_shell(brewing_builder(), input)
}
