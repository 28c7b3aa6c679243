//! Peershell binary entry point.

use std::sync::Arc;

use peershell::{cli, logging, reactions, Config, Shell, StubEngine};
use tracing::info;

fn main() -> peershell::Result<()> {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return Ok(());
    }
    if args.version {
        cli::print_version();
        return Ok(());
    }

    let config = Config::load(&args)
        .map_err(|e| peershell::PeerShellError::Config(e.to_string()))?;

    logging::init_with_filter(config.log_filter());
    info!("peershell v{}", env!("CARGO_PKG_VERSION"));

    let command_set = config
        .command_set()
        .map_err(|e| peershell::PeerShellError::Config(e.to_string()))?;

    // The engine is an external collaborator; the stub stands in so the
    // controller runs on its own.
    let engine = Arc::new(StubEngine::default());
    let mut bindings = reactions::bind_all(engine.as_ref());
    info!(listeners = bindings.active(), "event reactions registered");

    let mut shell = Shell::with_session(
        engine.clone(),
        command_set,
        config.initial_session(),
        std::io::stdout(),
    )
    .with_prompt(config.shell.prompt.clone());

    let result = shell.run(std::io::stdin().lock());

    bindings.unregister(engine.as_ref());
    info!("event reactions detached, exiting");
    result
}
