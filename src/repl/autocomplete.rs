//! # Autocomplete Engine
//!
//! Produces completion candidates for a partially typed line and plans how
//! the line changes when they are applied. Painting the result is left to
//! the input loop.
//!
//! With zero or one token the candidates are the registered names matching
//! it; with more, the command named by the first token completes its own
//! arguments.

use crate::repl::session::Shell;
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("token pattern is valid"));

static TRAILING_SPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S\s+$").expect("trailing space pattern is valid"));

/// Split a command line into arguments
///
/// Double-quoted runs form one argument without their quotes. With
/// `keep_trailing_space`, whitespace after the last argument yields an extra
/// empty argument: the user is about to type a new one.
pub fn tokenize(line: &str, keep_trailing_space: bool) -> Vec<String> {
    let mut tokens: Vec<String> = TOKEN_PATTERN
        .captures_iter(line)
        .filter_map(|captures| captures.get(1).or_else(|| captures.get(2)))
        .map(|token| token.as_str().to_string())
        .collect();

    if keep_trailing_space && TRAILING_SPACE_PATTERN.is_match(line) {
        tokens.push(String::new());
    }
    tokens
}

/// Candidates for the last argument of `line`
pub fn candidates(shell: &mut Shell, line: &str) -> Vec<String> {
    let args = tokenize(line, true);
    let registry = shell.registry();

    match args.as_slice() {
        [] => registry.complete(""),
        [typed] => registry.complete(typed),
        [name, ..] => registry
            .resolve(name)
            .map(|command| command.autocomplete(shell, &args))
            .unwrap_or_default(),
    }
}

/// Longest prefix shared by every candidate
pub fn longest_common_prefix(candidates: &[String]) -> String {
    let Some((first, rest)) = candidates.split_first() else {
        return String::new();
    };

    let mut length = first.chars().count();
    for candidate in rest {
        length = first
            .chars()
            .zip(candidate.chars())
            .take(length)
            .take_while(|(a, b)| a == b)
            .count();
    }
    first.chars().take(length).collect()
}

/// How the input line changes on TAB
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing to complete
    Beep,
    /// Single candidate: the line is replaced, cursor at its end
    Replace { line: String },
    /// Several candidates: the list is shown and the prompt repainted with
    /// `line`
    Choices {
        line: String,
        candidates: Vec<String>,
    },
}

/// Plan the completion of `line` with `candidates`
///
/// The line is first normalized to its arguments joined by single spaces.
/// The candidates replace the longest tail of the line, starting at an
/// argument, that is a case-insensitive prefix of the first candidate; when
/// there is none, the last argument is replaced.
pub fn plan_completion(line: &str, candidates: &[String]) -> Completion {
    let Some(first) = candidates.first() else {
        return Completion::Beep;
    };

    let args = tokenize(line, true);
    let pretty: Vec<char> = prettify(&args).chars().collect();
    let replaced = replaced_tail(&pretty, &args, first);
    let kept: String = pretty[..pretty.len() - replaced].iter().collect();

    if candidates.len() == 1 {
        return Completion::Replace {
            line: format!("{kept}{first} "),
        };
    }

    let common = longest_common_prefix(candidates);
    let line = if common.chars().count() > replaced {
        format!("{kept}{common}")
    } else {
        pretty.iter().collect()
    };

    Completion::Choices {
        line,
        candidates: candidates.to_vec(),
    }
}

/// Arguments joined by single spaces, quoting those containing whitespace
fn prettify(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.chars().any(char::is_whitespace) {
                format!("\"{arg}\"")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Number of trailing characters of `pretty` the candidates replace
fn replaced_tail(pretty: &[char], args: &[String], candidate: &str) -> usize {
    let candidate: Vec<char> = candidate.chars().collect();

    // Start offset of every argument in the prettified line
    let mut starts = Vec::with_capacity(args.len());
    let mut offset = 0;
    for arg in args {
        starts.push(offset);
        offset += prettify(std::slice::from_ref(arg)).chars().count() + 1;
    }

    starts
        .iter()
        .map(|&start| pretty.len() - start.min(pretty.len()))
        .find(|&length| starts_with_ignore_case(&candidate, &pretty[pretty.len() - length..]))
        .unwrap_or_else(|| args.last().map_or(0, |arg| arg.chars().count()))
}

fn starts_with_ignore_case(text: &[char], prefix: &[char]) -> bool {
    prefix.len() <= text.len()
        && text
            .iter()
            .zip(prefix)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}
