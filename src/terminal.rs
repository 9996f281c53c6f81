use crate::errors::ShellResult;
use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use std::io;
use tracing::debug;

/// Switching the controlling terminal in and out of raw input mode.
pub trait TerminalMode {
    /// Deliver keystrokes one at a time without echo.
    fn enter_raw(&mut self) -> ShellResult<()>;

    /// Put back the mode that was active at startup.
    fn leave_raw(&mut self) -> ShellResult<()>;
}

/// The terminal attached to stdin.
///
/// When stdin is not a terminal every operation is a no-op, so the shell can
/// read scripted input from a pipe.
pub struct Terminal {
    original: Option<Termios>,
    raw: bool,
}

impl Terminal {
    pub fn stdin() -> Self {
        let original = match tcgetattr(io::stdin()) {
            Ok(termios) => Some(termios),
            Err(e) => {
                debug!(error = %e, "stdin is not a terminal, raw mode disabled");
                None
            }
        };
        Self {
            original,
            raw: false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.original.is_some()
    }
}

impl TerminalMode for Terminal {
    fn enter_raw(&mut self) -> ShellResult<()> {
        let Some(original) = &self.original else {
            return Ok(());
        };
        if self.raw {
            return Ok(());
        }

        let mut raw = original.clone();
        raw.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        tcsetattr(io::stdin(), SetArg::TCSANOW, &raw)?;
        self.raw = true;
        Ok(())
    }

    fn leave_raw(&mut self) -> ShellResult<()> {
        let Some(original) = &self.original else {
            return Ok(());
        };
        if !self.raw {
            return Ok(());
        }

        tcsetattr(io::stdin(), SetArg::TCSANOW, original)?;
        self.raw = false;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = self.leave_raw() {
            debug!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// A terminal that never changes mode. Used when input is not interactive.
#[derive(Debug, Default)]
pub struct NoTerminal;

impl TerminalMode for NoTerminal {
    fn enter_raw(&mut self) -> ShellResult<()> {
        Ok(())
    }

    fn leave_raw(&mut self) -> ShellResult<()> {
        Ok(())
    }
}
