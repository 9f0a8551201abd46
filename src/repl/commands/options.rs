//! # Option Parser
//!
//! Turns the arguments of a command into named option values and positional
//! tokens. A token shaped like `-name` or `--name` opens an option; its arity
//! decides how many of the following non-flag tokens become its value.
//!
//! Parsing never fails. Unknown options and missing values are reported as
//! warnings (unless silenced) and the best-effort result is returned.

use crate::repl::session::Shell;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static FLAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--?([A-Za-z0-9][A-Za-z0-9_-]*)?$").expect("flag pattern is valid")
});

/// Lowercased option name of a flag-shaped token
///
/// A bare `-` or `--` names no option and is an ordinary token.
pub fn flag_name(token: &str) -> Option<String> {
    typed_flag_name(token).filter(|name| !name.is_empty())
}

pub fn is_flag_shaped(token: &str) -> bool {
    flag_name(token).is_some()
}

/// Name typed so far after a leading `-` or `--`, possibly empty
fn typed_flag_name(token: &str) -> Option<String> {
    FLAG_PATTERN.captures(token).map(|captures| {
        captures
            .get(1)
            .map(|name| name.as_str().to_lowercase())
            .unwrap_or_default()
    })
}

/// Number of value tokens an option consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No value, the option is a switch
    Flag,
    /// Exactly this many tokens
    Exactly(usize),
    /// Every token up to the next flag
    Variadic,
}

impl Arity {
    /// Arity from the conventional count: 0, N or -1
    pub fn from_count(count: i32) -> Self {
        match count {
            0 => Arity::Flag,
            n if n > 0 => Arity::Exactly(n as usize),
            _ => Arity::Variadic,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Flag => f.write_str("0"),
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::Variadic => f.write_str("1+"),
        }
    }
}

/// Value of an option after parsing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionValue {
    /// Absent and without default
    #[default]
    Unset,
    Switch(bool),
    Text(String),
}

impl OptionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// True for an enabled switch or any text value
    pub fn is_set(&self) -> bool {
        match self {
            OptionValue::Unset => false,
            OptionValue::Switch(enabled) => *enabled,
            OptionValue::Text(_) => true,
        }
    }
}

/// Declaration of one option of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub arity: Arity,
    pub default: OptionValue,
}

impl OptionSpec {
    /// Option named `name`, defaulting to unset (or off for switches)
    pub fn new(name: &str, arity: Arity) -> Self {
        let default = match arity {
            Arity::Flag => OptionValue::Switch(false),
            _ => OptionValue::Unset,
        };
        Self {
            name: name.to_lowercase(),
            arity,
            default,
        }
    }

    pub fn flag(name: &str) -> Self {
        Self::new(name, Arity::Flag)
    }

    pub fn single(name: &str) -> Self {
        Self::new(name, Arity::Exactly(1))
    }

    pub fn variadic(name: &str) -> Self {
        Self::new(name, Arity::Variadic)
    }

    pub fn with_default(mut self, default: OptionValue) -> Self {
        self.default = default;
        self
    }
}

/// One element of the ordered parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedElement {
    /// Positional token
    Token(String),
    /// Declared option with its value and the number of value tokens read
    Option {
        name: String,
        value: OptionValue,
        tokens: usize,
    },
    /// Flag-shaped token that matches no declared option, kept literally
    Flag(String),
}

/// Final parse result: a value for every declared option plus positionals
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedOptions {
    values: BTreeMap<String, OptionValue>,
    positional: Vec<String>,
}

impl ParsedOptions {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_text)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::is_set)
    }

    /// Positional tokens, including unknown flags kept literally
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn values(&self) -> &BTreeMap<String, OptionValue> {
        &self.values
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseWarning {
    UnknownOption(String),
    MissingValue {
        name: String,
        expected: Arity,
        got: usize,
    },
}

/// Options declared by a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTable {
    specs: Vec<OptionSpec>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, spec: OptionSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    pub fn spec(&self, name: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Parse `args` (command name first), warning through the shell
    pub fn parse(&self, args: &[String], shell: &mut Shell) -> ParsedOptions {
        let (elements, warnings) = self.scan(args);

        let mut reported: Vec<&ParseWarning> = Vec::new();
        for warning in &warnings {
            if reported.contains(&warning) {
                continue;
            }
            reported.push(warning);

            let message = match warning {
                ParseWarning::UnknownOption(token) => {
                    shell.trf("OptionParser", "unknown_option", &[token])
                }
                ParseWarning::MissingValue {
                    name,
                    expected,
                    got,
                } => shell.trf("OptionParser", "missing_value", &[name, expected, got]),
            };
            shell.warn(&message, 1);
        }

        self.collect(elements)
    }

    /// Parse without reporting anything
    pub fn parse_silent(&self, args: &[String]) -> ParsedOptions {
        let (elements, _) = self.scan(args);
        self.collect(elements)
    }

    /// Parsed elements in input order, without warnings
    pub fn parse_ordered(&self, args: &[String]) -> Vec<ParsedElement> {
        self.scan(args).0
    }

    /// `--name` candidates for a flag being typed as the last argument
    ///
    /// Options already given earlier on the line are not offered again.
    pub fn complete_flag(&self, args: &[String]) -> Vec<String> {
        let Some((last, previous)) = args.split_last() else {
            return Vec::new();
        };
        let Some(partial) = typed_flag_name(last) else {
            return Vec::new();
        };

        let used: Vec<String> = self
            .parse_ordered(previous)
            .into_iter()
            .filter_map(|element| match element {
                ParsedElement::Option { name, .. } => Some(name),
                _ => None,
            })
            .collect();

        self.specs
            .iter()
            .filter(|spec| !used.contains(&spec.name) && spec.name.starts_with(&partial))
            .map(|spec| format!("--{}", spec.name))
            .collect()
    }

    fn collect(&self, elements: Vec<ParsedElement>) -> ParsedOptions {
        let mut parsed = ParsedOptions {
            values: self
                .specs
                .iter()
                .map(|spec| (spec.name.clone(), spec.default.clone()))
                .collect(),
            positional: Vec::new(),
        };

        for element in elements {
            match element {
                ParsedElement::Option { name, value, .. } => {
                    parsed.values.insert(name, value);
                }
                ParsedElement::Token(token) | ParsedElement::Flag(token) => {
                    parsed.positional.push(token);
                }
            }
        }
        parsed
    }

    fn scan(&self, args: &[String]) -> (Vec<ParsedElement>, Vec<ParseWarning>) {
        let mut elements = Vec::new();
        let mut warnings = Vec::new();
        let tokens = args.get(1..).unwrap_or_default();

        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];
            i += 1;

            let Some(name) = flag_name(token) else {
                elements.push(ParsedElement::Token(token.clone()));
                continue;
            };
            let Some(spec) = self.spec(&name) else {
                warnings.push(ParseWarning::UnknownOption(token.clone()));
                elements.push(ParsedElement::Flag(token.clone()));
                continue;
            };

            let limit = match spec.arity {
                Arity::Flag => {
                    elements.push(ParsedElement::Option {
                        name,
                        value: OptionValue::Switch(true),
                        tokens: 0,
                    });
                    continue;
                }
                Arity::Exactly(n) => n,
                Arity::Variadic => usize::MAX,
            };

            let values: Vec<&str> = tokens[i..]
                .iter()
                .take_while(|value| !is_flag_shaped(value))
                .take(limit)
                .map(String::as_str)
                .collect();
            i += values.len();

            let missing = match spec.arity {
                Arity::Exactly(n) => values.len() < n,
                _ => values.is_empty(),
            };
            if missing {
                warnings.push(ParseWarning::MissingValue {
                    name: name.clone(),
                    expected: spec.arity,
                    got: values.len(),
                });
            }

            elements.push(ParsedElement::Option {
                name,
                tokens: values.len(),
                value: OptionValue::Text(values.join(" ")),
            });
        }

        (elements, warnings)
    }
}
