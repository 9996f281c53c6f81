pub mod commands;
pub mod config;
pub mod editor;
pub mod errors;
pub mod executor;
pub mod history;
pub mod parser;
pub mod pipeline;
pub mod redirection;
pub mod repl;
pub mod signals;
pub mod terminal;

use config::ShellConfig;
use errors::ShellResult;
use repl::{ExitReason, Shell};
use signals::SignalState;
use std::io;
use std::sync::Arc;
use terminal::Terminal;
use tracing::debug;

/// Main entry point for the shell REPL
///
/// Installs the signal handlers, then edits and runs lines from stdin until
/// the user leaves. The terminal mode in effect at startup is restored
/// before this returns.
pub fn run_shell(config: ShellConfig) -> ShellResult<ExitReason> {
    let signals = SignalState::new();
    signals::install(Arc::clone(&signals))?;

    let mut terminal = Terminal::stdin();
    debug!(interactive = terminal.is_terminal(), "starting shell");

    let mut shell = Shell::new(config, signals);
    let mut stdout = io::stdout();
    shell.run(io::stdin().lock(), &mut stdout, &mut terminal)
}
