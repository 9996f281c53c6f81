//! Shell-wide constants and the runtime configuration built from them.

use tracing::Level;

/// Prompt printed before every input line.
pub const PROMPT: &str = "it007sh>";

/// Input buffer slots, one of which is reserved for the terminator.
pub const MAX_INPUT: usize = 512;

/// Number of submitted lines kept for recall.
pub const HISTORY_SIZE: usize = 3;

/// Maximum number of tokens on either side of an operator.
pub const MAX_ARGS: usize = 100;

/// Printed after the prompt when the shell shuts down.
pub const FAREWELL: &str = "Goodbye! Exiting...";

/// How the `<` operator is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LessThanMode {
    /// `file < cmd args`: run the right-hand command with its output written
    /// (create/truncate) to the file named on the left.
    #[default]
    TruncateOutput,
    /// `cmd args < file`: run the left-hand command reading its input from
    /// the file named on the right.
    ReadInput,
}

/// Runtime configuration for a [`crate::repl::Shell`].
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub prompt: String,
    /// Input buffer slots; at most `input_capacity - 1` bytes are kept.
    pub input_capacity: usize,
    pub history_capacity: usize,
    pub max_args: usize,
    pub less_than: LessThanMode,
    /// Most verbose level the binary's log subscriber lets through.
    pub log_level: Level,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_string(),
            input_capacity: MAX_INPUT,
            history_capacity: HISTORY_SIZE,
            max_args: MAX_ARGS,
            less_than: LessThanMode::default(),
            log_level: Level::WARN,
        }
    }
}

impl ShellConfig {
    /// The line written when the shell exits.
    pub fn farewell(&self) -> String {
        format!("\n{} {}\n", self.prompt, FAREWELL)
    }
}
