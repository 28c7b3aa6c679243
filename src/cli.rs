//! Command-line interface for peershell.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::shell::CommandSet;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Identity file to remember at startup (overrides config file).
    pub identity: Option<String>,
    /// Restrict the shell to the basic command set.
    pub basic: bool,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

impl Args {
    /// The command set the arguments select, if any.
    pub fn command_set(&self) -> Option<CommandSet> {
        self.basic.then_some(CommandSet::Basic)
    }
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('i') | Long("identity") => {
                result.identity = Some(parser.value()?.parse()?);
            }
            Long("basic") => {
                result.basic = true;
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"peershell {version}
Minimal interactive controller for a peer-to-peer messaging engine

USAGE:
    peershell [OPTIONS]

OPTIONS:
    -c, --config <FILE>     Path to configuration file (JSON)
    -i, --identity <FILE>   Identity file to remember at startup
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
        --basic             Restrict to the basic command set
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    PEERSHELL_IDENTITY      Identity file (overrides config)
    PEERSHELL_LOG_LEVEL     Log level (overrides config)
    RUST_LOG                Alternative log level setting

COMMANDS (typed at the prompt):
    connect, disconnect, load, save, autosave, name, status, message, quit
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("peershell {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
