//! # Localization
//!
//! User-facing text is looked up by owner (the INI section, usually a command
//! name or a component name) and key. Strings are loaded from INI files laid out
//! as `<i18n path>/<language>/<file>`; every `[section]` `key = value` pair
//! becomes the entry `section.key`.
//!
//! The English strings are compiled into the binary so the shell is usable
//! without any file on disk. Loading a file merges its entries over the
//! existing ones.

use anyhow::{Context, Result};
use ini::{Ini, ParseOption};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

/// Built-in English strings
const BUILTIN_ENGLISH: &str = include_str!("../i18n/en/shell.ini");

/// Localized string table for one language
#[derive(Debug, Clone, Default)]
pub struct Language {
    language: String,
    entries: HashMap<String, String>,
}

impl Language {
    /// Create an empty string table
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            entries: HashMap::new(),
        }
    }

    /// English string table compiled into the binary
    pub fn builtin() -> Self {
        let mut language = Self::new("en");
        if let Err(e) = language.load_str(BUILTIN_ENGLISH) {
            tracing::warn!("Built-in strings could not be parsed: {}", e);
        }
        language
    }

    /// Load `<root>/<language>/<file>` over the built-in strings
    pub fn load(root: &Path, language: &str, file: &str) -> Result<Self> {
        let mut table = Self::builtin();
        table.language = language.to_string();
        table.load_file(&root.join(language).join(file))?;
        Ok(table)
    }

    /// Merge the entries of an INI file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        tracing::debug!("Loading strings from '{}'", path.display());

        let ini = Ini::load_from_file_opt(path, Self::parse_option())
            .with_context(|| format!("cannot load strings from '{}'", path.display()))?;
        self.merge(&ini);
        Ok(())
    }

    /// Merge the entries of INI content
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let ini = Ini::load_from_str_opt(content, Self::parse_option())
            .context("cannot parse strings")?;
        self.merge(&ini);
        Ok(())
    }

    fn parse_option() -> ParseOption {
        ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        }
    }

    fn merge(&mut self, ini: &Ini) {
        for (section, properties) in ini.iter() {
            let Some(section) = section else {
                continue;
            };
            for (key, value) in properties.iter() {
                self.entries
                    .insert(format!("{section}.{key}"), value.to_string());
            }
        }
    }

    /// Language code of this table
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Number of loaded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up `owner.key`, returning an empty string when absent
    pub fn lookup(&self, owner: &str, key: &str) -> String {
        self.entries
            .get(&format!("{owner}.{key}"))
            .cloned()
            .unwrap_or_default()
    }

    /// Look up `owner.key` and fill its `{}` placeholders in order
    pub fn format(&self, owner: &str, key: &str, args: &[&dyn Display]) -> String {
        fill(&self.lookup(owner, key), args)
    }
}

/// Replace each `{}` of `template` by the next argument
///
/// Surplus placeholders are left as they are and surplus arguments are ignored.
pub fn fill(template: &str, args: &[&dyn Display]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(position) = rest.find("{}") {
        result.push_str(&rest[..position]);
        match args.next() {
            Some(arg) => result.push_str(&arg.to_string()),
            None => result.push_str("{}"),
        }
        rest = &rest[position + 2..];
    }
    result.push_str(rest);
    result
}
