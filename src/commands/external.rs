use crate::errors::{ShellError, ShellResult};
use crate::signals::SignalState;
use std::fs::File;
use std::io::Write;
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::debug;

/// One external program invocation with optional stdio overrides.
pub struct ExternalCommand<'a> {
    args: &'a [String],
    stdin: Option<Stdio>,
    stdout: Option<File>,
}

impl<'a> ExternalCommand<'a> {
    /// `args[0]` is the program, looked up in PATH.
    pub fn new(args: &'a [String]) -> Self {
        Self {
            args,
            stdin: None,
            stdout: None,
        }
    }

    pub fn stdin(mut self, stdin: Stdio) -> Self {
        self.stdin = Some(stdin);
        self
    }

    /// Send the program's output to `stdout`, a file or the write end of a
    /// pipe. A not-found report goes there as well.
    pub fn stdout(mut self, stdout: File) -> Self {
        self.stdout = Some(stdout);
        self
    }

    pub fn name(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    /// Start the program and record it as the foreground child.
    ///
    /// Any failure to start it, missing or not executable, is reported as
    /// [`ShellError::CommandNotFound`].
    pub fn spawn(self, signals: &SignalState) -> ShellResult<Child> {
        let name = self.name().to_string();
        let Some((program, rest)) = self.args.split_first() else {
            return Err(ShellError::CommandNotFound(name));
        };

        let mut cmd = Command::new(program);
        cmd.args(rest);
        if let Some(stdin) = self.stdin {
            cmd.stdin(stdin);
        }
        if let Some(stdout) = self.stdout {
            cmd.stdout(Stdio::from(stdout));
        }

        let child = cmd.spawn().map_err(|e| {
            debug!(command = %name, error = %e, "spawn failed");
            ShellError::CommandNotFound(name.clone())
        })?;
        signals.set_active_child(child.id());
        debug!(command = %name, pid = child.id(), "spawned");
        Ok(child)
    }

    /// Like [`ExternalCommand::spawn`], but a program that cannot be started
    /// is reported and `None` is returned.
    ///
    /// The report is written where the program's output would have gone: the
    /// stdout override if one was given, `console` otherwise.
    pub fn spawn_or_report<W: Write>(
        self,
        signals: &SignalState,
        console: &mut W,
    ) -> ShellResult<Option<Child>> {
        console.flush()?;
        let mut report_to = self.stdout.as_ref().map(File::try_clone).transpose()?;
        match self.spawn(signals) {
            Ok(child) => Ok(Some(child)),
            Err(err @ ShellError::CommandNotFound(_)) => {
                match report_to.as_mut() {
                    Some(target) => writeln!(target, "{}", err)?,
                    None => {
                        writeln!(console, "{}", err)?;
                        console.flush()?;
                    }
                }
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Wait for a foreground child, then forget it.
pub fn wait_foreground(mut child: Child, signals: &SignalState) -> ShellResult<ExitStatus> {
    let status = child.wait();
    signals.clear_active_child();
    let status = status?;
    debug!(pid = child.id(), %status, "child finished");
    Ok(status)
}
