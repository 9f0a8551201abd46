//! # Command Groups
//!
//! A command owning a registry of sub-commands. Invoked alone it opens a
//! nested session over the parent's terminal; invoked with arguments it runs
//! one sub-command and returns.

use super::builtins::{Exit, Help};
use super::command::{Command, CommandArc};
use super::registry::{CommandRegistry, RegistryNotice};
use crate::repl::session::Shell;
use std::sync::Arc;

/// Names of the nested session controls, hidden from group completion
const SESSION_COMMANDS: &[&str] = &["exit", "quit", "help"];

/// Command dispatching to its own registry
#[derive(Debug, Clone)]
pub struct CommandGroup {
    name: String,
    aliases: Vec<String>,
    registry: Arc<CommandRegistry>,
}

impl CommandGroup {
    /// Group named `name` with the built-in commands registered
    pub fn new(name: impl Into<String>) -> Self {
        let mut group = Self {
            name: name.into(),
            aliases: Vec::new(),
            registry: Arc::new(CommandRegistry::new()),
        };
        group.register(Arc::new(Exit));
        group.register(Arc::new(Help));
        group
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn command(mut self, command: CommandArc) -> Self {
        self.register(command);
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    fn register(&mut self, command: CommandArc) {
        for notice in Arc::make_mut(&mut self.registry).register(command) {
            if let RegistryNotice::AliasIgnored { alias } = notice {
                tracing::warn!("Group {}: alias {} already bound", self.name, alias);
            }
        }
    }
}

impl Command for CommandGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> Vec<String> {
        self.aliases.clone()
    }

    fn run(&self, shell: &mut Shell, args: &[String]) -> i32 {
        let registry = Arc::clone(&self.registry);

        if args.len() <= 1 {
            tracing::debug!("Entering group {}", self.name);
            let result = shell.with_scope(&self.name, registry, Shell::interact);
            tracing::debug!("Leaving group {}", self.name);

            return match result {
                Ok(()) => 0,
                Err(e) => {
                    tracing::warn!("Group {} session failed: {:#}", self.name, e);
                    shell.error(&e.to_string(), 0);
                    1
                }
            };
        }

        let sub_args = &args[1..];
        shell
            .with_scope(&self.name, Arc::clone(&registry), |shell| {
                registry.execute(shell, sub_args)
            })
            .unwrap_or(1)
    }

    fn autocomplete(&self, shell: &mut Shell, args: &[String]) -> Vec<String> {
        match args.get(1..).unwrap_or_default() {
            [] => Vec::new(),
            [typed] => self
                .registry
                .complete(typed)
                .into_iter()
                .filter(|name| !SESSION_COMMANDS.contains(&name.as_str()))
                .collect(),
            sub_args => match self.registry.resolve(&sub_args[0]) {
                Some(command) => {
                    shell.with_scope(&self.name, Arc::clone(&self.registry), |shell| {
                        command.autocomplete(shell, sub_args)
                    })
                }
                None => Vec::new(),
            },
        }
    }
}
