pub mod estimate;
pub mod locator;
pub mod process;

// Re-exports for convenience
pub use estimate::{estimate, EntrySize};
pub use locator::{resolve_location, BinaryLocator, LocatorConfig, PathPrompt, Resolution, StdinPrompt};
pub use process::{Completion, ShellProcess};
