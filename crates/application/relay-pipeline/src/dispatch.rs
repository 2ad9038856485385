use crate::monitor::ProgressMonitor;
use crate::sink::ProgressSink;
use relay_core::output::shape_output;
use relay_core::{CommandInvocation, CommandOutput, RelayError, ToolLocation, TransferUnit};
use relay_infra::{estimate, ShellProcess};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Builds, runs and interprets single rclone invocations.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    binary: ToolLocation,
    unit: TransferUnit,
    debug: bool,
    poll_interval: Duration,
}

impl Dispatcher {
    pub fn new(binary: ToolLocation, unit: TransferUnit, debug: bool) -> Self {
        Self {
            binary,
            unit,
            debug,
            poll_interval: relay_config::POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn binary(&self) -> &ToolLocation {
        &self.binary
    }

    pub fn unit(&self) -> TransferUnit {
        self.unit
    }

    /// Live progress only makes sense for a transfer from a local path that exists.
    pub fn tracks_progress(&self, invocation: &CommandInvocation) -> bool {
        invocation.progress
            && !invocation.raw
            && invocation.subcommand.is_transfer()
            && Path::new(&invocation.source).exists()
    }

    pub fn command_line(&self, arguments: &str) -> String {
        if arguments.is_empty() {
            self.binary.to_string()
        } else {
            format!("{} {}", self.binary, arguments)
        }
    }

    pub fn run(
        &self,
        invocation: CommandInvocation,
        sink: &mut dyn ProgressSink,
    ) -> Result<CommandOutput, RelayError> {
        // Structured deletes are refused; a raw line is the deliberate way in.
        if invocation.subcommand.is_protected() && !invocation.raw {
            return Err(RelayError::ProtectedCommand(
                invocation.subcommand.to_string(),
            ));
        }
        let invocation = invocation.validate()?;
        let progress = self.tracks_progress(&invocation);
        let arguments =
            invocation.arguments(progress.then_some(relay_config::PROGRESS_FLAG));
        let command_line = self.command_line(&arguments);

        if self.debug {
            debug!("{}", command_line);
        }

        let expected = if progress {
            Some(estimate(Path::new(&invocation.source), self.unit)?)
        } else {
            None
        };

        // Dropping `process` on an early return kills and reaps the child.
        let mut process = ShellProcess::spawn(&command_line)?;

        let mut output = String::new();
        if let Some(total) = expected {
            sink.start(total, self.unit);
            let mut monitor = ProgressMonitor::new(sink, self.unit);
            let (transcript, _) = monitor.drive(&mut process, self.poll_interval)?;
            output = transcript;
        }

        let done = process.finish()?;
        output.push_str(&done.output);

        if !done.status.success() {
            warn!(
                "`{}` exited with {}; parsing its output anyway",
                invocation.subcommand, done.status
            );
        }

        shape_output(&invocation, &arguments, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new("/usr/bin/rclone".into(), TransferUnit::Bytes, false)
    }

    #[test]
    fn progress_needs_a_local_transfer_source() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().to_str().unwrap().to_string();
        let d = dispatcher();

        assert!(d.tracks_progress(&CommandInvocation::new("sync").source(local.clone())));
        assert!(!d.tracks_progress(&CommandInvocation::new("sync").source("remote:src")));
        assert!(!d.tracks_progress(&CommandInvocation::new("size").source(local.clone())));
        assert!(!d.tracks_progress(
            &CommandInvocation::new("copy")
                .source(local)
                .progress(false)
        ));
        assert!(!d.tracks_progress(&CommandInvocation::raw("copy a b")));
    }

    #[test]
    fn command_line_prefixes_the_binary() {
        let d = dispatcher();
        assert_eq!(d.command_line("lsf remote:"), "/usr/bin/rclone lsf remote:");
        assert_eq!(d.command_line(""), "/usr/bin/rclone");
    }

    #[test]
    fn structured_delete_is_refused_before_spawning() {
        let d = Dispatcher::new("/nonexistent/rclone".into(), TransferUnit::Bytes, false);
        let err = d
            .run(CommandInvocation::new("delete").source("remote:dir"), &mut NullSink)
            .unwrap_err();
        assert!(matches!(err, RelayError::ProtectedCommand(ref s) if s == "delete"));
    }

    #[test]
    #[cfg(unix)]
    fn raw_delete_reaches_the_shell() {
        let d = Dispatcher::new("echo".into(), TransferUnit::Bytes, false);
        let out = d
            .run(CommandInvocation::raw("delete remote:dir"), &mut NullSink)
            .unwrap();
        assert_eq!(out.into_text().unwrap(), "delete remote:dir");
    }
}
