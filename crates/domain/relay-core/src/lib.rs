pub mod error;
pub mod invocation;
pub mod output;
pub mod subcommand;
pub mod units;

pub use error::{RelayError, RelayErrorKind};
pub use invocation::CommandInvocation;
pub use output::{CommandOutput, SizeSummary};
pub use subcommand::Subcommand;
pub use units::{parse_size_token, round2, SizeReading, TransferUnit};

/// Filesystem location of the rclone executable.
pub type ToolLocation = camino::Utf8PathBuf;
