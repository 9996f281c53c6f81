mod exit;

pub use exit::ExitCommand;
