use crate::errors::{ShellError, ShellResult};
use crate::parser::Operator;
use std::fs::{File, OpenOptions};

/// Redirection mode (overwrite output or read input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectionMode {
    Overwrite,
    Input,
}

/// Represents a redirection specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub file: String,
    pub mode: RedirectionMode,
}

impl Redirection {
    /// Take the filename from the first token of `tokens`.
    pub fn from_tokens(
        tokens: &[String],
        mode: RedirectionMode,
        operator: Operator,
    ) -> ShellResult<Self> {
        let file = tokens.first().ok_or_else(|| {
            ShellError::Redirection(format!("Expected filename for '{}'", operator.symbol()))
        })?;
        Ok(Self {
            file: file.clone(),
            mode,
        })
    }

    /// Open the target: create/truncate/write-only for output, read-only for input.
    pub fn open(&self) -> ShellResult<File> {
        let mut options = OpenOptions::new();
        match self.mode {
            RedirectionMode::Overwrite => options.write(true).create(true).truncate(true),
            RedirectionMode::Input => options.read(true),
        };
        options
            .open(&self.file)
            .map_err(|e| ShellError::Redirection(format!("Failed to open '{}': {}", self.file, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn missing_filename_is_an_error() {
        let err =
            Redirection::from_tokens(&[], RedirectionMode::Overwrite, Operator::RedirectOut)
                .unwrap_err();
        assert!(matches!(err, ShellError::Redirection(_)));
        assert_eq!(err.to_string(), "Redirection error: Expected filename for '>'");
    }

    #[test]
    fn overwrite_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old contents that are long").unwrap();

        let redir = Redirection {
            file: path.to_string_lossy().into_owned(),
            mode: RedirectionMode::Overwrite,
        };
        let mut file = redir.open().unwrap();
        file.write_all(b"new").unwrap();
        drop(file);

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn input_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let redir = Redirection {
            file: dir.path().join("absent").to_string_lossy().into_owned(),
            mode: RedirectionMode::Input,
        };
        assert!(matches!(redir.open(), Err(ShellError::Redirection(_))));
    }

    #[test]
    fn first_token_names_the_file() {
        let tokens = vec!["a.txt".to_string(), "extra".to_string()];
        let redir =
            Redirection::from_tokens(&tokens, RedirectionMode::Input, Operator::RedirectIn)
                .unwrap();
        assert_eq!(redir.file, "a.txt");
        assert_eq!(redir.mode, RedirectionMode::Input);
    }
}
