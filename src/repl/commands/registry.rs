//! # Command Registry
//!
//! Owns the commands of one shell and the aliases bound to them. Entries
//! keep their registration order, which is the order names are listed and
//! completed in.
//!
//! Aliases never shadow an existing binding. An alias may point at a name
//! that is not registered yet, so chains can be dangling or cyclic; resolution
//! walks them with a visited set and reports such chains as unresolved.

use super::command::CommandArc;
use crate::repl::session::Shell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// What a registry name is bound to
#[derive(Clone)]
pub enum RegistryEntry {
    Command(CommandArc),
    Alias(String),
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEntry::Command(command) => write!(f, "Command({})", command.name()),
            RegistryEntry::Alias(target) => write!(f, "Alias({target})"),
        }
    }
}

/// Outcome of a registration, reported to the user at shell debug level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryNotice {
    Loaded { name: String },
    Replaced { name: String },
    AliasAdded { alias: String, target: String },
    AliasIgnored { alias: String },
}

/// Name → command/alias table of a shell
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    entries: Vec<(String, RegistryEntry)>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a command under its name, then bind its declared aliases
    pub fn register(&mut self, command: CommandArc) -> Vec<RegistryNotice> {
        let name = command.name().to_string();
        let aliases = command.aliases();

        let mut notices = Vec::with_capacity(1 + aliases.len());
        if self.index.contains_key(&name) {
            notices.push(RegistryNotice::Replaced { name: name.clone() });
        } else {
            notices.push(RegistryNotice::Loaded { name: name.clone() });
        }
        self.bind(name.clone(), RegistryEntry::Command(command));

        for alias in aliases {
            notices.push(self.add_alias(&alias, &name));
        }
        notices
    }

    /// Bind `alias` to `target` unless the name is already used
    ///
    /// `target` does not have to be registered yet.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> RegistryNotice {
        if self.index.contains_key(alias) {
            tracing::debug!("Alias {} already bound, not pointing it at {}", alias, target);
            return RegistryNotice::AliasIgnored {
                alias: alias.to_string(),
            };
        }

        self.bind(alias.to_string(), RegistryEntry::Alias(target.to_string()));
        RegistryNotice::AliasAdded {
            alias: alias.to_string(),
            target: target.to_string(),
        }
    }

    fn bind(&mut self, name: String, entry: RegistryEntry) {
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = entry,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, entry));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Follow the alias chain from `name` to a command
    pub fn resolve(&self, name: &str) -> Option<CommandArc> {
        self.resolve_entry(name).map(|(_, command)| Arc::clone(command))
    }

    /// Name of the command the alias chain from `name` ends at
    pub fn resolve_name(&self, name: &str) -> Option<String> {
        self.resolve_entry(name).map(|(resolved, _)| resolved.to_string())
    }

    fn resolve_entry<'a>(&'a self, name: &'a str) -> Option<(&'a str, &'a CommandArc)> {
        let mut visited = HashSet::new();
        let mut current = name;

        loop {
            match self.get(current)? {
                RegistryEntry::Command(command) => return Some((current, command)),
                RegistryEntry::Alias(target) => {
                    if !visited.insert(current) {
                        tracing::debug!("Alias cycle while resolving {}", name);
                        return None;
                    }
                    current = target.as_str();
                }
            }
        }
    }

    /// Every bound name, commands and aliases, in registration order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Registered commands in registration order
    pub fn commands(&self) -> Vec<CommandArc> {
        self.entries
            .iter()
            .filter_map(|(_, entry)| match entry {
                RegistryEntry::Command(command) => Some(Arc::clone(command)),
                RegistryEntry::Alias(_) => None,
            })
            .collect()
    }

    /// Aliases pointing directly at `name`
    pub fn aliases_of(&self, name: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|(alias, entry)| match entry {
                RegistryEntry::Alias(target) if target == name => Some(alias.clone()),
                _ => None,
            })
            .collect()
    }

    /// Names starting with `prefix`, case-sensitive
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the command named by `args[0]`
    ///
    /// Unknown and unresolvable names are reported through the shell using the
    /// name as typed, and yield `None`.
    pub fn execute(&self, shell: &mut Shell, args: &[String]) -> Option<i32> {
        let typed = args.first()?;

        match self.resolve(typed) {
            Some(command) => {
                tracing::debug!("Executing {} as {}", typed, command.name());
                let code = command.run(shell, args);
                tracing::debug!("{} exited with {}", command.name(), code);
                Some(code)
            }
            None => {
                let message = shell.trf("Shell", "unknown_command", &[typed]);
                shell.error(&message, 0);
                None
            }
        }
    }
}
