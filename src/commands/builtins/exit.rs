use crate::commands::registry::BuiltinCommand;
use crate::commands::Flow;
use crate::errors::ShellResult;
use crate::signals::SignalState;

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exit the shell"
    }

    fn execute(&self, _args: &[String], signals: &SignalState) -> ShellResult<Flow> {
        // Arguments are ignored; the shell always leaves with status 0.
        signals.interrupt_child();
        Ok(Flow::Exit)
    }
}
