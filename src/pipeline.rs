use crate::commands::{wait_foreground, ExternalCommand};
use crate::errors::{ShellError, ShellResult};
use crate::parser::Operator;
use crate::signals::SignalState;
use nix::fcntl::OFlag;
use nix::unistd::pipe2;
use std::fs::File;
use std::io::Write;
use std::process::Stdio;
use tracing::debug;

/// Run `upstream | downstream`.
///
/// The upstream stage runs to completion before the downstream stage is
/// started, so its output must fit in the pipe buffer. If the upstream
/// program cannot be started its not-found report is what the downstream
/// one reads.
pub fn execute_pipeline<W: Write>(
    upstream: &[String],
    downstream: &[String],
    signals: &SignalState,
    console: &mut W,
) -> ShellResult<()> {
    if upstream.is_empty() {
        return Ok(());
    }
    if downstream.is_empty() {
        return Err(ShellError::Syntax(format!(
            "Expected command after '{}'",
            Operator::Pipe.symbol()
        )));
    }

    let (read_end, write_end) = pipe2(OFlag::O_CLOEXEC)?;
    // The write end is consumed here, so the downstream stage sees end of
    // input once the upstream one exits.
    if let Some(child) = ExternalCommand::new(upstream)
        .stdout(File::from(write_end))
        .spawn_or_report(signals, console)?
    {
        wait_foreground(child, signals)?;
    }
    debug!("upstream finished, starting downstream");

    if let Some(child) = ExternalCommand::new(downstream)
        .stdin(Stdio::from(read_end))
        .spawn_or_report(signals, console)?
    {
        wait_foreground(child, signals)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn upstream_output_feeds_downstream() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("tee.txt");
        let out_path = out.to_string_lossy().into_owned();
        let signals = SignalState::new();
        let mut console = Vec::new();

        execute_pipeline(
            &args(&["echo", "hello", "pipe"]),
            &args(&["tee", out_path.as_str()]),
            &signals,
            &mut console,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "hello pipe\n");
        assert!(console.is_empty());
        assert_eq!(signals.active_child(), None);
    }

    #[test]
    fn missing_upstream_reports_into_the_pipe() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("tee.txt");
        let out_path = out.to_string_lossy().into_owned();
        let signals = SignalState::new();
        let mut console = Vec::new();

        execute_pipeline(
            &args(&["it007sh-no-such-program"]),
            &args(&["tee", out_path.as_str()]),
            &signals,
            &mut console,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "Command not found: it007sh-no-such-program\n"
        );
        assert!(console.is_empty());
    }

    #[test]
    fn missing_downstream_command_is_a_syntax_error() {
        let signals = SignalState::new();
        let mut console = Vec::new();
        let err = execute_pipeline(&args(&["echo"]), &[], &signals, &mut console).unwrap_err();
        assert!(matches!(err, ShellError::Syntax(_)));
        assert_eq!(err.to_string(), "Syntax error: Expected command after '|'");
    }

    #[test]
    fn missing_downstream_program_is_reported_on_the_console() {
        let signals = SignalState::new();
        let mut console = Vec::new();
        execute_pipeline(
            &args(&["echo", "lost"]),
            &args(&["it007sh-no-such-program"]),
            &signals,
            &mut console,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(console).unwrap(),
            "Command not found: it007sh-no-such-program\n"
        );
        assert_eq!(signals.active_child(), None);
    }

    #[test]
    fn empty_upstream_is_a_no_op() {
        let signals = SignalState::new();
        let mut console = Vec::new();
        execute_pipeline(&[], &args(&["true"]), &signals, &mut console).unwrap();
        assert!(console.is_empty());
    }
}
