use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

use crate::config::{DEFAULT_LANGUAGE, DEFAULT_TITLE};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Title shown in the prompt
    #[clap(short = 't', long, default_value = DEFAULT_TITLE, help = "prompt title")]
    title: String,

    /// 0: quiet, 1: normal, 2: user debug, 3: shell debug
    #[clap(
        short = 'v',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=3),
        help = "verbosity level (0-3)"
    )]
    verbosity: u8,

    /// Language of the shell messages
    #[clap(short = 'l', long, default_value = DEFAULT_LANGUAGE, help = "message language")]
    lang: String,

    /// Root directory of the localization files
    #[clap(long, help = "localization directory")]
    i18n_path: Option<PathBuf>,

    /// Print the raw bytes and decoded key of every key press until ENTER
    #[clap(long, help = "print key sequences until ENTER")]
    probe_keys: bool,

    /// Command to execute once instead of starting a session
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    title: String,
    verbosity: u8,
    lang: String,
    i18n_path: Option<PathBuf>,
    probe_keys: bool,
    command: Vec<String>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            title: args.title,
            verbosity: args.verbosity,
            lang: args.lang,
            i18n_path: args.i18n_path,
            probe_keys: args.probe_keys,
            command: args.command,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn i18n_path(&self) -> Option<&PathBuf> {
        self.i18n_path.as_ref()
    }

    pub fn probe_keys(&self) -> bool {
        self.probe_keys
    }

    /// One-shot command, empty for an interactive session
    pub fn command(&self) -> &[String] {
        &self.command
    }
}
