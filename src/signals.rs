//! Forwarding of keyboard signals to the foreground child.
//!
//! The handlers only touch atomics and call `kill(2)`. Shutdown on SIGQUIT
//! is noted in [`SignalState`] and carried out by the REPL.

use crate::errors::ShellResult;
use nix::libc::c_int;
use nix::sys::signal::{kill, sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::Pid;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use tracing::debug;

const NO_CHILD: i32 = -1;

static INSTALLED: OnceCell<Arc<SignalState>> = OnceCell::new();

/// State shared between the main loop and the signal handlers.
#[derive(Debug)]
pub struct SignalState {
    active_child: AtomicI32,
    quit_requested: AtomicBool,
}

impl Default for SignalState {
    fn default() -> Self {
        Self {
            active_child: AtomicI32::new(NO_CHILD),
            quit_requested: AtomicBool::new(false),
        }
    }
}

impl SignalState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_active_child(&self, pid: u32) {
        let pid = i32::try_from(pid).unwrap_or(NO_CHILD);
        self.active_child.store(pid, Ordering::SeqCst);
    }

    pub fn clear_active_child(&self) {
        self.active_child.store(NO_CHILD, Ordering::SeqCst);
    }

    pub fn active_child(&self) -> Option<Pid> {
        let pid = self.active_child.load(Ordering::SeqCst);
        (pid > 0).then(|| Pid::from_raw(pid))
    }

    /// Send SIGINT to the foreground child. Returns whether one was signalled.
    pub fn interrupt_child(&self) -> bool {
        match self.active_child() {
            Some(pid) => kill(pid, Signal::SIGINT).is_ok(),
            None => false,
        }
    }

    pub fn request_quit(&self) {
        self.quit_requested.store(true, Ordering::SeqCst);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested.load(Ordering::SeqCst)
    }
}

extern "C" fn on_interrupt(_signal: c_int) {
    if let Some(state) = INSTALLED.get() {
        state.interrupt_child();
    }
}

extern "C" fn on_quit(_signal: c_int) {
    if let Some(state) = INSTALLED.get() {
        state.interrupt_child();
        state.request_quit();
    }
}

/// Route SIGINT and SIGQUIT to `state`.
///
/// `SA_RESTART` is left unset so a blocked read returns `EINTR` and the
/// caller can check [`SignalState::quit_requested`]. Only the first call
/// installs anything.
pub fn install(state: Arc<SignalState>) -> ShellResult<()> {
    if INSTALLED.set(state).is_err() {
        debug!("signal handlers already installed");
        return Ok(());
    }

    let interrupt = SigAction::new(
        SigHandler::Handler(on_interrupt),
        SaFlags::empty(),
        SigSet::empty(),
    );
    let quit = SigAction::new(
        SigHandler::Handler(on_quit),
        SaFlags::empty(),
        SigSet::empty(),
    );

    // SAFETY: both handlers only perform atomic operations and kill(2).
    unsafe {
        sigaction(Signal::SIGINT, &interrupt)?;
        sigaction(Signal::SIGQUIT, &quit)?;
    }
    debug!("SIGINT and SIGQUIT handlers installed");
    Ok(())
}
