//! # Shell Session
//!
//! The interactive loop tying the line editor to the command registry:
//! prompt, read a line key by key, tokenize it, execute it, until a command
//! ends the session, the input ends or the user interrupts.
//!
//! Raw mode is held only while a line is being read and is restored on
//! every exit path of [`Shell::input`].

use crate::config;
use crate::i18n::Language;
use crate::repl::autocomplete::{self, Completion};
use crate::repl::commands::{CommandArc, CommandRegistry, Exit, Help, RegistryNotice};
use crate::repl::console::{self, Console};
use crate::repl::events::{EscapeTable, KeyDecoder, KeyEvent};
use crate::repl::io::{ByteSource, RenderStream, TerminalByteSource, TerminalRenderStream};
use crate::repl::models::{EditOutcome, LineBuffer};
use crate::repl::text::{format_columns, PrintStyle};
use crate::repl::views::LineRenderer;
use anyhow::Result;
use std::fmt::Display;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of reading one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// ENTER was pressed
    Line(String),
    /// The user asked to end the session
    Interrupted,
    /// The input source is exhausted
    EndOfInput,
}

/// Builder for [`Shell`]
pub struct ShellBuilder {
    title: String,
    verbosity: u8,
    width: usize,
    language: Arc<Language>,
    commands: Vec<CommandArc>,
    aliases: Vec<(String, String)>,
    escape_table: EscapeTable,
    interrupt: Arc<AtomicBool>,
}

impl ShellBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            verbosity: console::NORMAL,
            width: config::DEFAULT_WIDTH,
            language: Arc::new(Language::builtin()),
            commands: Vec::new(),
            aliases: Vec::new(),
            escape_table: EscapeTable::for_platform(),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Arc::new(language);
        self
    }

    pub fn command(mut self, command: CommandArc) -> Self {
        self.commands.push(command);
        self
    }

    /// Bind an extra alias after the commands are registered
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), target.into()));
        self
    }

    pub fn escape_table(mut self, table: EscapeTable) -> Self {
        self.escape_table = table;
        self
    }

    /// Flag set from outside (e.g. a signal handler) to end the session
    pub fn interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = flag;
        self
    }

    pub fn build(
        self,
        input: Box<dyn ByteSource>,
        output: Box<dyn RenderStream>,
        errors: Box<dyn Write + Send>,
    ) -> Shell {
        let mut console = Console::new(output, errors, self.verbosity, self.width);

        let mut registry = CommandRegistry::new();
        let builtins: [CommandArc; 2] = [Arc::new(Exit), Arc::new(Help)];
        let mut notices = Vec::new();
        for command in builtins.into_iter().chain(self.commands) {
            notices.extend(registry.register(command));
        }
        for (alias, target) in &self.aliases {
            notices.push(registry.add_alias(alias, target));
        }

        for notice in notices {
            let message = notice_message(&self.language, &notice);
            console.log(&message, console::SHELL_DEBUG);
        }

        tracing::debug!(
            "Shell '{}' built with {} names, escape table '{}'",
            self.title,
            registry.len(),
            self.escape_table.name()
        );

        Shell {
            title: self.title,
            console,
            registry: Arc::new(registry),
            language: self.language,
            decoder: KeyDecoder::new(self.escape_table),
            input,
            running: false,
            interrupt: self.interrupt,
        }
    }

    /// Build over stdin, stdout and stderr
    pub fn build_stdio(self) -> Shell {
        self.build(
            Box::new(TerminalByteSource::new()),
            Box::new(TerminalRenderStream::new()),
            Box::new(std::io::stderr()),
        )
    }
}

fn notice_message(language: &Language, notice: &RegistryNotice) -> String {
    match notice {
        RegistryNotice::Loaded { name } => language.format("Shell", "loading_command", &[name]),
        RegistryNotice::Replaced { name } => {
            language.format("Shell", "replacing_command", &[name])
        }
        RegistryNotice::AliasAdded { alias, target } => {
            language.format("Shell", "adding_alias", &[alias, target])
        }
        RegistryNotice::AliasIgnored { alias } => {
            language.format("Shell", "ignoring_alias", &[alias])
        }
    }
}

/// An interactive command shell
pub struct Shell {
    title: String,
    console: Console,
    registry: Arc<CommandRegistry>,
    language: Arc<Language>,
    decoder: KeyDecoder,
    input: Box<dyn ByteSource>,
    running: bool,
    interrupt: Arc<AtomicBool>,
}

impl Shell {
    pub fn builder(title: impl Into<String>) -> ShellBuilder {
        ShellBuilder::new(title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn prompt(&self) -> String {
        format!("{} > ", self.title)
    }

    /// Registry of the active scope
    pub fn registry(&self) -> Arc<CommandRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn language(&self) -> Arc<Language> {
        Arc::clone(&self.language)
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn decoder(&self) -> &KeyDecoder {
        &self.decoder
    }

    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// End the current session after the running command returns
    pub fn exit(&mut self) {
        self.running = false;
    }

    /// Localized text
    pub fn tr(&self, owner: &str, key: &str) -> String {
        self.language.lookup(owner, key)
    }

    /// Localized text with `{}` placeholders filled in order
    pub fn trf(&self, owner: &str, key: &str, args: &[&dyn Display]) -> String {
        self.language.format(owner, key, args)
    }

    pub fn print(&mut self, message: &str, style: &PrintStyle) -> usize {
        self.console.print(message, style)
    }

    pub fn println(&mut self, message: &str) -> usize {
        self.console.println(message)
    }

    pub fn log(&mut self, message: &str, level: u8) {
        self.console.log(message, level);
    }

    pub fn warn(&mut self, message: &str, level: u8) {
        self.console.warn(message, level);
    }

    /// Report an error, prefixed by its code when it is positive
    pub fn error(&mut self, message: &str, code: i32) {
        if code > 0 {
            let message = self.trf("Shell", "error_number", &[&code, &message]);
            self.console.error(&message);
        } else {
            self.console.error(message);
        }
    }

    /// Run the command named by `args[0]` in the active registry
    pub fn execute(&mut self, args: &[String]) -> Option<i32> {
        let registry = self.registry();
        registry.execute(self, args)
    }

    /// Completion candidates for a partially typed line
    pub fn autocomplete(&mut self, line: &str) -> Vec<String> {
        autocomplete::candidates(self, line)
    }

    /// Run `f` with another registry and title, restoring them afterwards
    ///
    /// The running state is restored too, so `exit` inside the scope only
    /// ends the scoped session.
    pub fn with_scope<T>(
        &mut self,
        title: &str,
        registry: Arc<CommandRegistry>,
        f: impl FnOnce(&mut Shell) -> T,
    ) -> T {
        let saved_title = std::mem::replace(&mut self.title, title.to_string());
        let saved_registry = std::mem::replace(&mut self.registry, registry);
        let saved_running = self.running;

        let result = f(self);

        self.title = saved_title;
        self.registry = saved_registry;
        self.running = saved_running;
        result
    }

    /// Start the shell
    ///
    /// Without arguments, runs the interactive loop and returns `None`.
    /// Otherwise executes `args` once and returns the command's exit code,
    /// or `None` when the command is unknown.
    pub fn run(&mut self, args: &[String]) -> Result<Option<i32>> {
        if args.is_empty() {
            self.interact()?;
            Ok(None)
        } else {
            Ok(self.execute(args))
        }
    }

    /// Prompt, read and execute lines until the session ends
    pub fn interact(&mut self) -> Result<()> {
        self.running = true;

        while self.running {
            if self.interrupt.load(Ordering::SeqCst) {
                self.handle_interrupt();
                break;
            }

            let prompt = self.prompt();
            match self.input(&prompt)? {
                ReadOutcome::Line(line) => {
                    let args = autocomplete::tokenize(&line, false);
                    if args.is_empty() {
                        continue;
                    }
                    self.execute(&args);
                }
                ReadOutcome::Interrupted => self.handle_interrupt(),
                ReadOutcome::EndOfInput => {
                    tracing::debug!("Input ended, leaving session '{}'", self.title);
                    let newline = self.console.newline();
                    self.console.write_raw(newline);
                    self.running = false;
                }
            }
        }

        self.console.flush();
        Ok(())
    }

    fn handle_interrupt(&mut self) {
        self.interrupt.store(false, Ordering::SeqCst);
        let newline = self.console.newline();
        self.console.write_raw(newline);
        let message = self.tr("Shell", "interrupt_by_user");
        self.console.log(&message, console::QUIET);
        self.running = false;
    }

    /// Read one line in raw mode
    pub fn input(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.console.enable_raw_mode()?;
        let outcome = self.read_line(prompt);
        let restored = self.console.disable_raw_mode();

        let outcome = outcome?;
        restored?;
        Ok(outcome)
    }

    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        let mut buffer = LineBuffer::new();
        let mut renderer = LineRenderer::new();

        self.console.write_raw(prompt);
        self.console.flush();

        loop {
            let Some(key) = self.decoder.read_key(self.input.as_mut())? else {
                return Ok(ReadOutcome::EndOfInput);
            };
            if self.interrupt.load(Ordering::SeqCst) {
                return Ok(ReadOutcome::Interrupted);
            }

            match key {
                KeyEvent::Enter => {
                    let newline = self.console.newline();
                    self.console.write_raw(newline);
                    self.console.flush();
                    return Ok(ReadOutcome::Line(buffer.text()));
                }
                KeyEvent::Interrupt => return Ok(ReadOutcome::Interrupted),
                KeyEvent::Tab => self.complete_line(prompt, &mut buffer, &mut renderer),
                key => match buffer.apply(key) {
                    Some(EditOutcome::Redraw) => {
                        let output = renderer.redraw(&buffer);
                        self.console.write_raw(&output);
                    }
                    Some(EditOutcome::Beep) | None => self.console.beep(),
                },
            }
            self.console.flush();
        }
    }

    fn complete_line(&mut self, prompt: &str, buffer: &mut LineBuffer, renderer: &mut LineRenderer) {
        let line = buffer.text();
        let candidates = self.autocomplete(&line);
        tracing::debug!("Completing {:?}: {:?}", line, candidates);

        match autocomplete::plan_completion(&line, &candidates) {
            Completion::Beep => self.console.beep(),
            Completion::Replace { line } => {
                buffer.set_text(&line);
                let output = renderer.redraw(buffer);
                self.console.write_raw(&output);
            }
            Completion::Choices { line, candidates } => {
                buffer.set_text(&line);

                let newline = self.console.newline();
                let mut output = String::from(newline);
                for row in format_columns(&candidates, self.console.terminal_width()) {
                    output.push_str(&row);
                    output.push_str(newline);
                }
                output.push_str(prompt);

                *renderer = LineRenderer::new();
                output.push_str(&renderer.redraw(buffer));
                self.console.write_raw(&output);
            }
        }
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("title", &self.title)
            .field("console", &self.console)
            .field("registry", &self.registry)
            .field("running", &self.running)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::repl::io::{MockByteSource, MockRenderStream, RenderRecorder, SharedWriter};

    /// Shell over mock streams fed with `input`, using the Unix escape table
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
}

#[cfg(test)]
mod tests {
    use super::testing::mock_shell;
    use super::*;
    use crate::repl::io::RenderCommand;

    #[test]
    fn input_should_return_line_and_restore_cooked_mode() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"hop\r");

        let outcome = shell.input("beer > ").unwrap();

        assert_eq!(outcome, ReadOutcome::Line("hop".to_string()));
        assert_eq!(recorder.output_string(), "beer > hop\r\n");
        let commands = recorder.get_commands();
        assert_eq!(commands.first(), Some(&RenderCommand::EnableRawMode));
        assert!(commands.contains(&RenderCommand::DisableRawMode));
        assert!(!shell.console().is_raw_mode());
    }

    #[test]
    fn input_should_restore_cooked_mode_at_end_of_input() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"ho");

        assert_eq!(shell.input("> ").unwrap(), ReadOutcome::EndOfInput);
        assert!(recorder.has_command(&RenderCommand::DisableRawMode));
    }

    #[test]
    fn input_should_edit_in_the_middle_of_the_line() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"hp\x1b[Do\r");

        let outcome = shell.input("").unwrap();

        assert_eq!(outcome, ReadOutcome::Line("hop".to_string()));
        assert_eq!(recorder.output_string(), "hp\x08op\x08\r\n");
    }

    #[test]
    fn input_should_beep_on_boundary_moves() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"\x7f\x1b[D\r");

        shell.input("").unwrap();

        assert_eq!(recorder.output_string(), "\x07\x07\r\n");
    }

    #[test]
    fn input_should_report_ctrl_c_as_interrupt() {
        let (mut shell, _, _) = mock_shell(Shell::builder("beer"), b"ab\x03cd\r");

        assert_eq!(shell.input("").unwrap(), ReadOutcome::Interrupted);
    }

    #[test]
    fn tab_should_list_choices_and_repaint_the_prompt() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"\t\r");

        shell.input("beer > ").unwrap();

        assert_eq!(
            recorder.output_string(),
            "beer > \r\nexit  quit  help\r\nbeer > \r\n"
        );
    }

    #[test]
    fn tab_should_beep_without_candidates() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"zz\t\r");

        shell.input("").unwrap();

        assert_eq!(recorder.output_string(), "zz\x07\r\n");
    }

    #[test]
    fn run_should_execute_one_shot_commands() {
        let (mut shell, _, errors) = mock_shell(Shell::builder("beer"), b"");

        assert_eq!(shell.run(&["help".to_string()]).unwrap(), Some(0));
        assert_eq!(shell.run(&["brew".to_string()]).unwrap(), None);
        assert_eq!(errors.contents(), "[!] Unknown command \"brew\".\n");
    }

    #[test]
    fn run_should_log_interrupt_and_end_session() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"he\x03help\r");

        assert_eq!(shell.run(&[]).unwrap(), None);

        assert!(!shell.is_running());
        assert_eq!(
            recorder.output_string(),
            "beer > he\n[*] Interrupted by user.\n"
        );
    }

    #[test]
    fn run_should_end_on_interrupt_flag() {
        let (mut shell, recorder, _) = mock_shell(Shell::builder("beer"), b"help\r");
        shell.interrupt_flag().store(true, Ordering::SeqCst);

        shell.run(&[]).unwrap();

        assert_eq!(recorder.output_string(), "\n[*] Interrupted by user.\n");
        assert!(!shell.interrupt_flag().load(Ordering::SeqCst));
    }

    #[test]
    fn run_should_skip_empty_lines() {
        let (mut shell, recorder, errors) = mock_shell(Shell::builder("beer"), b"\r   \rquit\r");

        shell.run(&[]).unwrap();

        assert_eq!(
            recorder.output_string(),
            "beer > \r\nbeer >    \r\nbeer > quit\r\n"
        );
        assert_eq!(errors.contents(), "");
    }

    #[test]
    fn builder_should_default_to_configured_width_and_verbosity() {
        let (shell, _, _) = mock_shell(Shell::builder("beer"), b"");

        assert_eq!(shell.console().width(), config::DEFAULT_WIDTH);
        assert_eq!(shell.console().verbosity(), console::NORMAL);
    }

    #[test]
    fn error_should_prefix_positive_codes() {
        let (mut shell, _, errors) = mock_shell(Shell::builder("beer"), b"");

        shell.error("bad malt", 4);
        shell.error("plain", 0);

        assert_eq!(errors.contents(), "[!] Error 4: bad malt\n[!] plain\n");
    }

    #[test]
    fn builder_should_log_registration_at_shell_debug_level() {
        let builder = Shell::builder("beer")
            .verbosity(console::SHELL_DEBUG)
            .alias("bye", "exit")
            .alias("quit", "help");
        let (_, recorder, _) = mock_shell(builder, b"");

        let output = recorder.output_string();
        assert!(output.contains("[*] Loading command \"exit\".\n"));
        assert!(output.contains("[*] Adding alias \"quit\" for command \"exit\".\n"));
        assert!(output.contains("[*] Adding alias \"bye\" for command \"exit\".\n"));
        assert!(output.contains("[*] Alias \"quit\" is already bound, ignoring it.\n"));
    }

    #[test]
    fn with_scope_should_restore_title_registry_and_running_state() {
        let (mut shell, _, _) = mock_shell(Shell::builder("beer"), b"");
        shell.set_running(true);

        let title = shell.with_scope("hop", Arc::new(CommandRegistry::new()), |shell| {
            shell.exit();
            assert!(shell.registry().is_empty());
            shell.prompt()
        });

        assert_eq!(title, "hop > ");
        assert_eq!(shell.title(), "beer");
        assert!(shell.is_running());
        assert!(shell.registry().contains("help"));
    }
}
