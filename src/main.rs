//! # beershell Main Entry Point
//!
//! Interactive command shell with line editing and tab completion. Runs a
//! session when started without a command, otherwise executes the command
//! once and exits with its code.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use beershell::cmd_args::CommandLineArgs;
use beershell::config::{get_i18n_path, I18N_FILE, LOG_LEVEL_ENV_VAR};
use beershell::repl::events::{format_sequence, EscapeTable, KeyDecoder, KeyEvent};
use beershell::repl::io::{RenderStream, TerminalByteSource, TerminalRenderStream};
use beershell::{Language, Shell};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

fn main() -> Result<ExitCode> {
    init_tracing_subscriber();

    let cmd_args = CommandLineArgs::parse();
    tracing::debug!("Command line: {:?}", cmd_args);

    if cmd_args.probe_keys() {
        probe_keys()?;
        return Ok(ExitCode::SUCCESS);
    }

    let language = load_language(&cmd_args);
    let interrupt = Arc::new(AtomicBool::new(false));
    register_interrupt_handler(&interrupt);

    let mut shell = Shell::builder(cmd_args.title())
        .verbosity(cmd_args.verbosity())
        .language(language)
        .interrupt_flag(interrupt)
        .build_stdio();

    let code = shell.run(cmd_args.command())?;
    tracing::debug!("Shell finished with {:?}", code);

    Ok(ExitCode::from(exit_status(cmd_args.command().is_empty(), code)))
}

/// Process status: 0 for sessions, the command's code for one-shot runs
fn exit_status(interactive: bool, code: Option<i32>) -> u8 {
    match (interactive, code) {
        (true, _) => 0,
        (false, None) => 1,
        (false, Some(code)) => u8::try_from(code).unwrap_or(1),
    }
}

/// Load the messages of the requested language, falling back to English
fn load_language(cmd_args: &CommandLineArgs) -> Language {
    let root = get_i18n_path(cmd_args.i18n_path().and_then(|path| path.to_str()));
    tracing::debug!("Loading language '{}' from '{}'", cmd_args.lang(), root);

    match Language::load(Path::new(&root), cmd_args.lang(), I18N_FILE) {
        Ok(language) => language,
        Err(e) => {
            tracing::warn!("Using built-in messages: {:#}", e);
            Language::builtin()
        }
    }
}

#[cfg(unix)]
fn register_interrupt_handler(flag: &Arc<AtomicBool>) {
    if let Err(e) = signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(flag)) {
        tracing::warn!("Failed to register SIGINT handler: {}", e);
    }
}

#[cfg(not(unix))]
fn register_interrupt_handler(_flag: &Arc<AtomicBool>) {}

/// Print every key sequence read from the terminal until ENTER
fn probe_keys() -> Result<()> {
    let decoder = KeyDecoder::new(EscapeTable::for_platform());
    let mut input = TerminalByteSource::new();
    let mut output = TerminalRenderStream::new();

    writeln!(output, "Escape table '{}', press ENTER to stop.", decoder.table().name())?;
    output.flush()?;

    output.enable_raw_mode()?;
    let result = probe_loop(&decoder, &mut input, &mut output);
    output.disable_raw_mode()?;
    result
}

fn probe_loop(
    decoder: &KeyDecoder,
    input: &mut TerminalByteSource,
    output: &mut TerminalRenderStream<std::io::Stdout>,
) -> Result<()> {
    while let Some(sequence) = decoder.read_sequence(input)? {
        let key = decoder.decode(&sequence);
        let name = key.map_or_else(|| "unmapped".to_string(), |key| key.to_string());
        write!(output, "{} => {}\r\n", format_sequence(&sequence), name)?;
        output.flush()?;

        if matches!(key, Some(KeyEvent::Enter)) {
            break;
        }
    }
    Ok(())
}

fn init_tracing_subscriber() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(LOG_LEVEL_ENV_VAR))
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}
