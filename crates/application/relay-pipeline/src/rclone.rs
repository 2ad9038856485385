use crate::dispatch::Dispatcher;
use crate::sink::{NullSink, ProgressSink};
use relay_core::{
    CommandInvocation, CommandOutput, RelayError, SizeSummary, Subcommand, ToolLocation,
    TransferUnit,
};
use relay_infra::{BinaryLocator, LocatorConfig, PathPrompt, StdinPrompt};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct RcloneBuilder {
    binary: Option<String>,
    unit: TransferUnit,
    debug: bool,
    locator: Option<LocatorConfig>,
    poll_interval: Option<Duration>,
}

impl RcloneBuilder {
    /// Explicit binary path; skips the search path and the location file.
    pub fn binary(mut self, path: impl Into<String>) -> Self {
        self.binary = Some(path.into());
        self
    }

    pub fn unit(mut self, unit: TransferUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Log every command line at debug level.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub fn locator(mut self, config: LocatorConfig) -> Self {
        self.locator = Some(config);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn build(self) -> Result<Rclone, RelayError> {
        self.build_with_prompt(StdinPrompt)
    }

    pub fn build_with_prompt<P: PathPrompt>(self, prompt: P) -> Result<Rclone, RelayError> {
        let location = match self.binary.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => ToolLocation::from(path),
            None => {
                let config = match self.locator {
                    Some(config) => config,
                    None => LocatorConfig::from_home()?,
                };
                BinaryLocator::with_prompt(config, prompt).locate(None)?
            }
        };

        let mut dispatcher = Dispatcher::new(location, self.unit, self.debug);
        if let Some(interval) = self.poll_interval {
            dispatcher = dispatcher.with_poll_interval(interval);
        }
        Ok(Rclone { dispatcher })
    }
}

/// Programmatic front end to an rclone binary.
///
/// Known subcommands have typed methods; anything else goes through
/// [`Rclone::call`]. `delete` is refused here and must go through
/// [`Rclone::execute`].
#[derive(Debug, Clone)]
pub struct Rclone {
    dispatcher: Dispatcher,
}

impl Rclone {
    pub fn builder() -> RcloneBuilder {
        RcloneBuilder::default()
    }

    pub fn binary(&self) -> &ToolLocation {
        self.dispatcher.binary()
    }

    pub fn unit(&self) -> TransferUnit {
        self.dispatcher.unit()
    }

    pub fn run(
        &self,
        invocation: CommandInvocation,
        sink: &mut dyn ProgressSink,
    ) -> Result<CommandOutput, RelayError> {
        self.dispatcher.run(invocation, sink)
    }

    /// Runs a complete command line (minus the binary) with no templating or progress.
    pub fn execute(&self, command_line: &str) -> Result<String, RelayError> {
        self.run(CommandInvocation::raw(command_line), &mut NullSink)?
            .into_text()
    }

    /// Forwards any subcommand by name.
    pub fn call(
        &self,
        name: &str,
        source: &str,
        destination: &str,
        flags: &[&str],
        sink: &mut dyn ProgressSink,
    ) -> Result<CommandOutput, RelayError> {
        let invocation = CommandInvocation::new(name)
            .source(source)
            .destination(destination)
            .flags(flags.iter().copied());
        self.run(invocation, sink)
    }

    fn transfer(
        &self,
        subcommand: Subcommand,
        source: &str,
        destination: &str,
        flags: &[&str],
        sink: &mut dyn ProgressSink,
    ) -> Result<String, RelayError> {
        let invocation = CommandInvocation::new(subcommand)
            .source(source)
            .destination(destination)
            .flags(flags.iter().copied());
        self.run(invocation, sink)?.into_text()
    }

    pub fn copy(
        &self,
        source: &str,
        destination: &str,
        flags: &[&str],
        sink: &mut dyn ProgressSink,
    ) -> Result<String, RelayError> {
        self.transfer(Subcommand::Copy, source, destination, flags, sink)
    }

    /// rclone `move`.
    pub fn move_to(
        &self,
        source: &str,
        destination: &str,
        flags: &[&str],
        sink: &mut dyn ProgressSink,
    ) -> Result<String, RelayError> {
        self.transfer(Subcommand::Move, source, destination, flags, sink)
    }

    pub fn sync(
        &self,
        source: &str,
        destination: &str,
        flags: &[&str],
        sink: &mut dyn ProgressSink,
    ) -> Result<String, RelayError> {
        self.transfer(Subcommand::Sync, source, destination, flags, sink)
    }

    pub fn bisync(
        &self,
        source: &str,
        destination: &str,
        flags: &[&str],
        sink: &mut dyn ProgressSink,
    ) -> Result<String, RelayError> {
        self.transfer(Subcommand::Bisync, source, destination, flags, sink)
    }

    pub fn copyto(
        &self,
        source: &str,
        destination: &str,
        flags: &[&str],
        sink: &mut dyn ProgressSink,
    ) -> Result<String, RelayError> {
        self.transfer(Subcommand::Copyto, source, destination, flags, sink)
    }

    pub fn copyurl(
        &self,
        url: &str,
        destination: &str,
        flags: &[&str],
        sink: &mut dyn ProgressSink,
    ) -> Result<String, RelayError> {
        self.transfer(Subcommand::Copyurl, url, destination, flags, sink)
    }

    pub fn size(&self, path: &str, flags: &[&str]) -> Result<SizeSummary, RelayError> {
        self.call("size", path, "", flags, &mut NullSink)?
            .into_size()
    }

    pub fn lsjson(&self, path: &str, flags: &[&str]) -> Result<serde_json::Value, RelayError> {
        self.call("lsjson", path, "", flags, &mut NullSink)?
            .into_json()
    }

    /// Same as [`Rclone::lsf`]; rclone's own `ls` format is never used.
    pub fn ls(&self, path: &str, flags: &[&str]) -> Result<Vec<String>, RelayError> {
        self.call("ls", path, "", flags, &mut NullSink)?
            .into_lines()
    }

    pub fn lsf(&self, path: &str, flags: &[&str]) -> Result<Vec<String>, RelayError> {
        self.call("lsf", path, "", flags, &mut NullSink)?
            .into_lines()
    }

    /// `config <action>`; `config file` yields just the config path.
    pub fn config(&self, action: &str, flags: &[&str]) -> Result<String, RelayError> {
        self.call("config", action, "", flags, &mut NullSink)?
            .into_text()
    }

    /// Always refused. Deleting goes through [`Rclone::execute`] so it is never
    /// triggered by accident.
    pub fn delete(&self, _path: &str, _flags: &[&str]) -> Result<(), RelayError> {
        Err(RelayError::ProtectedCommand(Subcommand::Delete.to_string()))
    }
}
