pub mod dispatch;
pub mod monitor;
pub mod rclone;
pub mod sink;

pub use dispatch::Dispatcher;
pub use monitor::{LineKind, ProgressMonitor, ProgressState};
pub use rclone::{Rclone, RcloneBuilder};
pub use sink::{ChannelSink, NullSink, ProgressEvent, ProgressSink};

// Re-export core types often needed by consumers
pub use relay_core::{
    CommandInvocation, CommandOutput, RelayError, SizeReading, SizeSummary, Subcommand,
    TransferUnit,
};
