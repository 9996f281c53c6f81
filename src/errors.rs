use std::io;
use thiserror::Error;

/// Comprehensive error type for shell operations
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Redirection error: {0}")]
    Redirection(String),

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Too many arguments (limit {limit})")]
    TooManyArguments { limit: usize },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("System error: {0}")]
    System(#[from] nix::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_command() {
        let err = ShellError::CommandNotFound("frobnicate".to_string());
        assert_eq!(err.to_string(), "Command not found: frobnicate");
    }

    #[test]
    fn argument_overflow_reports_the_limit() {
        let err = ShellError::TooManyArguments { limit: 100 };
        assert_eq!(err.to_string(), "Too many arguments (limit 100)");
    }
}
