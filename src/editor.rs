//! Keystroke-driven line editing.
//!
//! [`LineEditor`] is fed one byte at a time and never touches the terminal
//! itself; the REPL decides when to call [`LineEditor::render`].

use crate::history::HistoryRing;
use std::io::{self, Write};
use tracing::trace;

const ESC: u8 = 0x1b;
const BACKSPACE: u8 = 127;
const NEWLINE: u8 = b'\n';

/// What the caller should do after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// The buffer may have changed; re-render the line.
    Redraw,
    /// A complete line was entered. Empty lines are submitted too.
    Submit(String),
    /// Nothing visible happened.
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    Idle,
    Escape,
    Bracket,
}

pub struct LineEditor {
    buffer: Vec<u8>,
    capacity: usize,
    history: HistoryRing,
    escape: EscapeState,
}

impl LineEditor {
    /// `capacity` counts buffer slots including the terminator slot, so at most
    /// `capacity - 1` bytes are stored.
    pub fn new(capacity: usize, history_capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
            history: HistoryRing::new(history_capacity),
            escape: EscapeState::Idle,
        }
    }

    pub fn handle_key(&mut self, byte: u8) -> KeyAction {
        match self.escape {
            EscapeState::Escape => {
                self.escape = if byte == b'[' {
                    EscapeState::Bracket
                } else {
                    EscapeState::Idle
                };
                KeyAction::Nothing
            }
            EscapeState::Bracket => {
                self.escape = EscapeState::Idle;
                let recalled = match byte {
                    b'A' => self.history.older().map(str::to_owned),
                    b'B' => self.history.newer().map(str::to_owned),
                    _ => None,
                };
                match recalled {
                    Some(entry) => {
                        self.load(&entry);
                        KeyAction::Redraw
                    }
                    None => KeyAction::Nothing,
                }
            }
            EscapeState::Idle => match byte {
                ESC => {
                    self.escape = EscapeState::Escape;
                    KeyAction::Nothing
                }
                NEWLINE => KeyAction::Submit(self.submit()),
                BACKSPACE => {
                    self.buffer.pop();
                    KeyAction::Redraw
                }
                _ => {
                    if self.buffer.len() + 1 < self.capacity {
                        self.buffer.push(byte);
                    } else {
                        trace!(byte, "input buffer full, keystroke dropped");
                    }
                    KeyAction::Redraw
                }
            },
        }
    }

    /// Clear the terminal line and print the prompt followed by the buffer.
    pub fn render<W: Write>(&self, prompt: &str, out: &mut W) -> io::Result<()> {
        write!(out, "\r\x1b[K{} ", prompt)?;
        out.write_all(&self.buffer)?;
        out.flush()
    }

    /// The line being edited, decoded lossily.
    pub fn line(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    fn submit(&mut self) -> String {
        let line = self.line();
        if !self.buffer.is_empty() {
            self.history.push(&line);
        }
        self.buffer.clear();
        line
    }

    fn load(&mut self, entry: &str) {
        let limit = self.capacity.saturating_sub(1);
        let bytes = entry.as_bytes();
        self.buffer.clear();
        self.buffer.extend_from_slice(&bytes[..bytes.len().min(limit)]);
    }
}
