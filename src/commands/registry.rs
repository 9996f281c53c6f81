use super::Flow;
use crate::errors::ShellResult;
use crate::signals::SignalState;
use once_cell::sync::Lazy;
use tracing::debug;

/// Trait that all builtin commands must implement
pub trait BuiltinCommand: Send + Sync {
    /// The command name (e.g., "exit")
    fn name(&self) -> &'static str;

    /// Help text / description for the command
    fn description(&self) -> &'static str;

    /// Execute the command with the given arguments
    /// args[0] is the command name itself
    fn execute(&self, args: &[String], signals: &SignalState) -> ShellResult<Flow>;
}

/// Central registry for all builtin commands
pub struct BuiltinRegistry {
    commands: Vec<Box<dyn BuiltinCommand>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn register<C: BuiltinCommand + 'static>(&mut self, cmd: C) {
        self.commands.push(Box::new(cmd));
    }

    /// Execute a builtin command by name
    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        signals: &SignalState,
    ) -> Option<ShellResult<Flow>> {
        self.find(name).map(|c| {
            debug!(builtin = c.name(), description = c.description(), "running builtin");
            c.execute(args, signals)
        })
    }

    fn find(&self, name: &str) -> Option<&dyn BuiltinCommand> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry instance
pub static BUILTINS: Lazy<BuiltinRegistry> = Lazy::new(|| {
    let mut registry = BuiltinRegistry::new();
    registry.register(super::builtins::ExitCommand);
    registry
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_the_only_builtin() {
        assert!(BUILTINS.find("exit").is_some());
        assert!(BUILTINS.find("cd").is_none());
        assert!(BUILTINS.find("echo").is_none());
        assert_eq!(
            BUILTINS.find("exit").map(|c| c.description()),
            Some("Exit the shell")
        );
    }

    #[test]
    fn unknown_names_are_not_executed() {
        let signals = SignalState::new();
        assert!(BUILTINS
            .execute("ls", &["ls".to_string()], &signals)
            .is_none());
    }
}
