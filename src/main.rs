use it007sh::config::ShellConfig;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = ShellConfig::default();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.log_level)
        .without_time()
        .init();

    match it007sh::run_shell(config) {
        Ok(reason) => {
            tracing::debug!(?reason, "exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("it007sh: {}", e);
            ExitCode::FAILURE
        }
    }
}
