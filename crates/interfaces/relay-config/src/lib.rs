//! Central configuration constants for the rclone control layer.

use std::time::Duration;

/// Executable name looked up on the search path.
pub const PROGRAM_NAME: &str = "rclone";

/// File in the home directory that remembers an interactively entered binary path.
pub const LOCATION_FILE_NAME: &str = ".relayrc";

/// Flag appended to transfer commands so rclone prints periodic stats.
pub const PROGRESS_FLAG: &str = "-P";

/// Subcommands that move data and therefore get live progress tracking.
pub const TRANSFER_SUBCOMMANDS: [&str; 6] = ["copy", "move", "sync", "bisync", "copyto", "copyurl"];

/// Delay between liveness checks once the output stream has closed.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Prompt shown when the binary cannot be found anywhere.
pub const LOCATION_PROMPT: &str = "Path to rclone binary: ";

/// Returns true when `name` is one of [`TRANSFER_SUBCOMMANDS`].
pub fn is_transfer_subcommand(name: &str) -> bool {
    TRANSFER_SUBCOMMANDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_list_excludes_listing_commands() {
        assert!(is_transfer_subcommand("bisync"));
        assert!(is_transfer_subcommand("copyurl"));
        assert!(!is_transfer_subcommand("size"));
        assert!(!is_transfer_subcommand("lsf"));
    }
}
