pub mod builtins;
pub mod external;
pub mod registry;

pub use external::{wait_foreground, ExternalCommand};
pub use registry::BUILTINS;

/// Whether the shell keeps reading input after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}
