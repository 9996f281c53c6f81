use crate::commands::Flow;
use crate::config::ShellConfig;
use crate::editor::{KeyAction, LineEditor};
use crate::errors::{ShellError, ShellResult};
use crate::executor::Executor;
use crate::history::HistoryRing;
use crate::parser::parse;
use crate::signals::SignalState;
use crate::terminal::TerminalMode;
use std::io::{self, Read, Write};
use std::sync::Arc;
use tracing::debug;

/// Why the input loop stopped. Every reason is a successful shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    ExitCommand,
    Quit,
    EndOfInput,
}

/// The interactive loop: keystrokes in, commands out.
pub struct Shell {
    config: ShellConfig,
    editor: LineEditor,
    executor: Executor,
    signals: Arc<SignalState>,
}

impl Shell {
    pub fn new(config: ShellConfig, signals: Arc<SignalState>) -> Self {
        let editor = LineEditor::new(config.input_capacity, config.history_capacity);
        let executor = Executor::new(Arc::clone(&signals), config.less_than);
        Self {
            config,
            editor,
            executor,
            signals,
        }
    }

    pub fn history(&self) -> &HistoryRing {
        self.editor.history()
    }

    /// Read keystrokes from `input` until `exit`, a quit request or end of
    /// input. The terminal is raw while a line is edited and restored while
    /// commands run.
    pub fn run<R, W, T>(
        &mut self,
        mut input: R,
        output: &mut W,
        terminal: &mut T,
    ) -> ShellResult<ExitReason>
    where
        R: Read,
        W: Write,
        T: TerminalMode,
    {
        terminal.enter_raw()?;
        self.prompt(output)?;

        let mut byte = [0u8; 1];
        loop {
            if self.signals.quit_requested() {
                return self.finish(ExitReason::Quit, output, terminal);
            }

            match input.read(&mut byte) {
                Ok(0) => return self.finish(ExitReason::EndOfInput, output, terminal),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    terminal.leave_raw()?;
                    return Err(ShellError::InputError(format!(
                        "Failed to read keystroke: {}",
                        e
                    )));
                }
            }

            match self.editor.handle_key(byte[0]) {
                KeyAction::Nothing => {}
                KeyAction::Redraw => self.editor.render(&self.config.prompt, output)?,
                KeyAction::Submit(line) => {
                    writeln!(output)?;
                    output.flush()?;
                    terminal.leave_raw()?;

                    if self.dispatch(&line, output) == Flow::Exit {
                        return self.finish(ExitReason::ExitCommand, output, terminal);
                    }
                    if self.signals.quit_requested() {
                        return self.finish(ExitReason::Quit, output, terminal);
                    }

                    terminal.enter_raw()?;
                    self.prompt(output)?;
                }
            }
        }
    }

    /// Parse and run one line. Failures are reported and never end the shell.
    fn dispatch<W: Write>(&self, line: &str, output: &mut W) -> Flow {
        let result = parse(line, self.config.max_args)
            .and_then(|plan| self.executor.execute(&plan, output));

        match result {
            Ok(flow) => flow,
            Err(e) => {
                debug!(error = %e, line, "line failed");
                match e {
                    ShellError::Redirection(msg) | ShellError::Syntax(msg) => eprintln!("{}", msg),
                    _ => eprintln!("Error: {}", e),
                }
                Flow::Continue
            }
        }
    }

    fn prompt<W: Write>(&self, output: &mut W) -> io::Result<()> {
        write!(output, "{} ", self.config.prompt)?;
        output.flush()
    }

    fn finish<W, T>(
        &self,
        reason: ExitReason,
        output: &mut W,
        terminal: &mut T,
    ) -> ShellResult<ExitReason>
    where
        W: Write,
        T: TerminalMode,
    {
        self.signals.interrupt_child();
        output.write_all(self.config.farewell().as_bytes())?;
        output.flush()?;
        terminal.leave_raw()?;
        debug!(?reason, "shell finished");
        Ok(reason)
    }
}
