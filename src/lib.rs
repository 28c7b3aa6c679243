//! # peershell
//!
//! Minimal interactive controller for a peer-to-peer messaging engine.
//!
//! The peer-to-peer protocol, cryptography, and network I/O live in an
//! external engine reached through the [`engine::Engine`] capability trait.
//! This crate is the thin layer on top: an interactive shell for the
//! operator (connect, identity load/save, presence updates) and a registry
//! that routes inbound engine events to reaction handlers.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use peershell::{reactions, CommandSet, Shell, StubEngine};
//!
//! fn main() -> peershell::Result<()> {
//!     peershell::logging::try_init().ok();
//!
//!     let engine = Arc::new(StubEngine::default());
//!     let mut bindings = reactions::bind_all(engine.as_ref());
//!
//!     let mut shell = Shell::new(engine.clone(), CommandSet::Extended, std::io::stdout());
//!     shell.run(std::io::stdin().lock())?;
//!
//!     bindings.unregister(engine.as_ref());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod logging;
pub mod reactions;
pub mod session;
pub mod shell;

// Re-export commonly used types
pub use config::Config;
pub use dispatch::{EventBindings, Registry};
pub use engine::{
    Engine, EngineError, Event, EventHandler, EventKind, EventSource, ListenerId, StubEngine,
};
pub use error::{PeerShellError, Result};
pub use session::Session;
pub use shell::{Command, CommandSet, Shell, ShellState};
