//! Interactive command loop.
//!
//! A synchronous, single-threaded read-eval-print loop over the controlling
//! terminal. Each line is tokenized on whitespace; the first token selects a
//! [`Command`] resolved through the command registry, the rest are passed to
//! the handler as positional arguments. Unknown input is rejected with a
//! diagnostic and the full command list; there is no implicit default on
//! this path, unlike the event side.

mod state;

pub use state::ShellState;

use std::fmt;
use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing::debug;

use crate::dispatch::Registry;
use crate::engine::Engine;
use crate::error::Result;
use crate::session::Session;

/// The commands the shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Connect,
    Disconnect,
    Load,
    Save,
    Autosave,
    Name,
    Status,
    Message,
    Quit,
}

impl Command {
    /// Parse a command token. Command names are case-sensitive, matching
    /// what the welcome banner advertises.
    pub fn parse(token: &str) -> Option<Command> {
        match token {
            "connect" => Some(Command::Connect),
            "disconnect" => Some(Command::Disconnect),
            "load" => Some(Command::Load),
            "save" => Some(Command::Save),
            "autosave" => Some(Command::Autosave),
            "name" => Some(Command::Name),
            "status" => Some(Command::Status),
            "message" => Some(Command::Message),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Command::Connect => "connect",
            Command::Disconnect => "disconnect",
            Command::Load => "load",
            Command::Save => "save",
            Command::Autosave => "autosave",
            Command::Name => "name",
            Command::Status => "status",
            Command::Message => "message",
            Command::Quit => "quit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which command table the shell is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandSet {
    /// Connection and identity management only.
    Basic,
    /// Basic plus profile commands (name, status, message).
    #[default]
    Extended,
}

const BASIC_COMMANDS: [Command; 6] = [
    Command::Connect,
    Command::Disconnect,
    Command::Load,
    Command::Save,
    Command::Autosave,
    Command::Quit,
];

const EXTENDED_COMMANDS: [Command; 9] = [
    Command::Connect,
    Command::Disconnect,
    Command::Load,
    Command::Save,
    Command::Autosave,
    Command::Name,
    Command::Status,
    Command::Message,
    Command::Quit,
];

impl CommandSet {
    pub fn commands(&self) -> &'static [Command] {
        match self {
            CommandSet::Basic => &BASIC_COMMANDS,
            CommandSet::Extended => &EXTENDED_COMMANDS,
        }
    }

    pub fn parse(token: &str) -> Option<CommandSet> {
        match token {
            "basic" => Some(CommandSet::Basic),
            "extended" => Some(CommandSet::Extended),
            _ => None,
        }
    }
}

/// A command handler: receives the shell and the positional arguments.
type CommandFn<E, W> = fn(&mut Shell<E, W>, &[&str]) -> Result<()>;

/// The interactive shell.
///
/// Generic over the engine capability and the output sink so tests can
/// substitute a recording engine and capture what the operator would see.
pub struct Shell<E: Engine, W: Write> {
    engine: Arc<E>,
    session: Session,
    set: CommandSet,
    commands: Registry<Command, CommandFn<E, W>>,
    out: W,
    state: ShellState,
    prompt: String,
}

impl<E: Engine, W: Write> Shell<E, W> {
    pub fn new(engine: Arc<E>, set: CommandSet, out: W) -> Self {
        Self::with_session(engine, set, Session::new(), out)
    }

    /// Construct a shell with preset session state (e.g. an identity path
    /// from the config file).
    pub fn with_session(engine: Arc<E>, set: CommandSet, session: Session, out: W) -> Self {
        let mut commands = Registry::new();
        for &cmd in set.commands() {
            commands.bind(cmd, Self::handler_for(cmd));
        }
        Self {
            engine,
            session,
            set,
            commands,
            out,
            state: ShellState::Idle,
            prompt: "> ".to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// The statically-typed command table: every enumerated command maps to
    /// its handler function here, and the registry restricts which of them
    /// the configured command set exposes.
    fn handler_for(cmd: Command) -> CommandFn<E, W> {
        match cmd {
            Command::Connect => Self::cmd_connect,
            Command::Disconnect => Self::cmd_disconnect,
            Command::Load => Self::cmd_load,
            Command::Save => Self::cmd_save,
            Command::Autosave => Self::cmd_autosave,
            Command::Name => Self::cmd_name,
            Command::Status => Self::cmd_status,
            Command::Message => Self::cmd_message,
            Command::Quit => Self::cmd_quit,
        }
    }

    /// Run the read loop until `quit` or end of input.
    ///
    /// The input stream is consumed and dropped on return, releasing the
    /// terminal before the process exits.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        writeln!(self.out, "Welcome to peershell! Available commands are:")?;
        self.print_command_list()?;
        self.transition(ShellState::AwaitingLine);
        self.print_prompt()?;

        for line in input.lines() {
            let line = line?;
            self.handle_line(&line)?;
            if self.state.is_terminal() {
                break;
            }
        }
        // End of input with no quit still terminates the loop.
        self.transition(ShellState::Terminated);
        Ok(())
    }

    /// Process one raw input line.
    ///
    /// Empty (or whitespace-only) input dispatches nothing and re-prompts.
    /// Engine failures are not caught here; they propagate to the caller.
    pub fn handle_line(&mut self, raw: &str) -> Result<()> {
        if self.state == ShellState::Idle {
            // Driven directly without `run` (tests, embedding).
            self.transition(ShellState::AwaitingLine);
        }

        let mut tokens = raw.split_whitespace();
        let name = match tokens.next() {
            Some(name) => name,
            None => return self.print_prompt(),
        };
        let args: Vec<&str> = tokens.collect();

        self.transition(ShellState::Dispatching);
        let resolved = Command::parse(name)
            .and_then(|cmd| self.commands.resolve(&cmd).copied().map(|h| (cmd, h)));
        match resolved {
            Some((cmd, handler)) => {
                debug!(command = %cmd, args = args.len(), "dispatching command");
                handler(self, &args)?;
            }
            None => {
                writeln!(self.out, "Invalid command! Available commands are:")?;
                self.print_command_list()?;
            }
        }

        if self.state.is_terminal() {
            return Ok(());
        }
        self.transition(ShellState::AwaitingLine);
        self.print_prompt()
    }

    fn transition(&mut self, target: ShellState) {
        if self.state.can_transition_to(target) {
            self.state = target;
        }
    }

    fn print_prompt(&mut self) -> Result<()> {
        write!(self.out, "{}", self.prompt)?;
        self.out.flush()?;
        Ok(())
    }

    fn print_command_list(&mut self) -> Result<()> {
        let names: Vec<&str> = self.set.commands().iter().map(Command::name).collect();
        writeln!(self.out, "{}", names.join(", "))?;
        Ok(())
    }

    fn cmd_connect(&mut self, _args: &[&str]) -> Result<()> {
        writeln!(self.out, "Connecting to the network...")?;
        writeln!(self.out, "Address: {}", self.engine.own_address())?;
        self.engine.start()?;
        self.session.connected = true;
        Ok(())
    }

    fn cmd_disconnect(&mut self, _args: &[&str]) -> Result<()> {
        self.engine.stop()?;
        self.session.connected = false;
        Ok(())
    }

    fn cmd_load(&mut self, args: &[&str]) -> Result<()> {
        // Space-join so paths containing spaces survive tokenization. An
        // empty path is forwarded as-is; rejecting it is the engine's call.
        let path = args.join(" ");

        if self.engine.is_running() {
            writeln!(
                self.out,
                "Warning: the engine is already started, all unsaved data will be lost."
            )?;
            self.engine.stop()?;
            self.session.connected = false;
        }

        self.session.identity_path = Some(path.clone());
        self.engine.load_identity(&path)?;
        Ok(())
    }

    fn cmd_save(&mut self, args: &[&str]) -> Result<()> {
        let given = args.join(" ");

        if given.is_empty() {
            // Fall back to the remembered path; with neither, warn and make
            // no engine call at all.
            match self.session.identity_path.clone() {
                Some(remembered) => self.engine.save_identity(&remembered)?,
                None => writeln!(self.out, "Warning: you must specify a filename.")?,
            }
        } else {
            // An explicit path always overrides the remembered one.
            self.session.identity_path = Some(given.clone());
            self.engine.save_identity(&given)?;
        }
        Ok(())
    }

    fn cmd_autosave(&mut self, args: &[&str]) -> Result<()> {
        let enabled = self.session.apply_autosave(args.first().copied());
        writeln!(self.out, "Identity auto-saving is currently: {}", enabled)?;
        if self.session.identity_path.is_none() {
            writeln!(
                self.out,
                "Warning: no identity file has been loaded, autosaving won't work until one is loaded."
            )?;
        }
        Ok(())
    }

    fn cmd_name(&mut self, args: &[&str]) -> Result<()> {
        // Empty text intentionally sets an empty display name.
        self.engine.set_display_name(&args.join(" "))?;
        Ok(())
    }

    fn cmd_status(&mut self, args: &[&str]) -> Result<()> {
        match args.first().and_then(|token| token.parse::<i64>().ok()) {
            Some(code) => self.engine.set_presence_status(code)?,
            None => writeln!(
                self.out,
                "Invalid status: expected a numeric presence code."
            )?,
        }
        Ok(())
    }

    fn cmd_message(&mut self, args: &[&str]) -> Result<()> {
        self.engine.set_status_message(&args.join(" "))?;
        Ok(())
    }

    fn cmd_quit(&mut self, _args: &[&str]) -> Result<()> {
        writeln!(self.out, "Bye!")?;
        self.engine.stop()?;
        self.session.connected = false;
        self.transition(ShellState::Terminated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StubEngine;

    fn shell(set: CommandSet) -> Shell<StubEngine, Vec<u8>> {
        Shell::new(Arc::new(StubEngine::default()), set, Vec::new())
    }

    fn output(shell: &Shell<StubEngine, Vec<u8>>) -> String {
        String::from_utf8(shell.out.clone()).unwrap()
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("connect"), Some(Command::Connect));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse("CONNECT"), None);
        assert_eq!(Command::parse("frobnicate"), None);
    }

    #[test]
    fn test_command_set_sizes() {
        assert_eq!(CommandSet::Basic.commands().len(), 6);
        assert_eq!(CommandSet::Extended.commands().len(), 9);
        assert!(!CommandSet::Basic.commands().contains(&Command::Name));
        assert!(CommandSet::Extended.commands().contains(&Command::Status));
    }

    #[test]
    fn test_command_set_parse() {
        assert_eq!(CommandSet::parse("basic"), Some(CommandSet::Basic));
        assert_eq!(CommandSet::parse("extended"), Some(CommandSet::Extended));
        assert_eq!(CommandSet::parse("full"), None);
    }

    #[test]
    fn test_empty_line_only_reprompts() {
        let mut shell = shell(CommandSet::Extended);
        shell.handle_line("   \t  ").unwrap();
        assert_eq!(output(&shell), "> ");
        assert_eq!(shell.state(), ShellState::AwaitingLine);
    }

    #[test]
    fn test_unknown_command_prints_list() {
        let mut shell = shell(CommandSet::Extended);
        shell.handle_line("selfdestruct now").unwrap();
        let out = output(&shell);
        assert!(out.contains("Invalid command!"));
        assert!(out.contains("connect, disconnect, load, save, autosave, name, status, message, quit"));
        assert!(out.ends_with("> "));
        // Session untouched
        assert!(!shell.session().connected);
        assert!(shell.session().identity_path.is_none());
    }

    #[test]
    fn test_basic_set_rejects_extended_command() {
        let mut shell = shell(CommandSet::Basic);
        shell.handle_line("name Alice").unwrap();
        let out = output(&shell);
        assert!(out.contains("Invalid command!"));
        assert!(out.contains("connect, disconnect, load, save, autosave, quit"));
    }

    #[test]
    fn test_quit_terminates_without_reprompt() {
        let mut shell = shell(CommandSet::Basic);
        shell.handle_line("quit").unwrap();
        assert_eq!(shell.state(), ShellState::Terminated);
        let out = output(&shell);
        assert!(out.contains("Bye!"));
        assert!(!out.ends_with("> "));
    }

    #[test]
    fn test_run_stops_at_quit() {
        let engine = Arc::new(StubEngine::default());
        let mut shell = Shell::new(engine.clone(), CommandSet::Extended, Vec::new());
        let input = b"connect\nquit\nconnect\n" as &[u8];
        shell.run(input).unwrap();

        assert_eq!(shell.state(), ShellState::Terminated);
        // The connect after quit must never run.
        assert!(!engine.is_running());
        let out = output(&shell);
        assert!(out.starts_with("Welcome to peershell!"));
        assert!(out.contains("Bye!"));
    }

    #[test]
    fn test_run_terminates_on_eof() {
        let mut shell = shell(CommandSet::Basic);
        shell.run(b"autosave on\n" as &[u8]).unwrap();
        assert_eq!(shell.state(), ShellState::Terminated);
        assert!(shell.session().autosave);
    }

    #[test]
    fn test_status_rejects_non_numeric() {
        let mut sh = shell(CommandSet::Extended);
        sh.handle_line("status away").unwrap();
        assert!(output(&sh).contains("Invalid status"));

        let mut bare = shell(CommandSet::Extended);
        bare.handle_line("status").unwrap();
        assert!(output(&bare).contains("Invalid status"));
    }
}
