use crate::{RelayError, Subcommand};

/// One subcommand execution: built, run and dropped per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub subcommand: Subcommand,
    pub source: String,
    pub destination: String,
    pub progress: bool,
    /// Pass the subcommand through as a complete command line.
    pub raw: bool,
    pub flags: Vec<String>,
}

impl CommandInvocation {
    pub fn new(subcommand: impl Into<Subcommand>) -> Self {
        Self {
            subcommand: subcommand.into(),
            source: String::new(),
            destination: String::new(),
            progress: true,
            raw: false,
            flags: Vec::new(),
        }
    }

    /// A fully formed command line, run without templating or progress.
    pub fn raw(command_line: &str) -> Self {
        Self {
            subcommand: Subcommand::Other(command_line.to_string()),
            progress: false,
            raw: true,
            ..Self::new(Subcommand::Other(String::new()))
        }
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    /// Rejects copy/move without a destination and renames `ls` to rclone's `lsf`.
    pub fn validate(mut self) -> Result<Self, RelayError> {
        if self.subcommand.requires_destination()
            && !self.source.is_empty()
            && self.destination.is_empty()
        {
            return Err(RelayError::MissingDestination(self.subcommand.to_string()));
        }
        if self.subcommand == Subcommand::Ls {
            self.subcommand = Subcommand::Lsf;
        }
        Ok(self)
    }

    /// Everything after the executable, space separated with empty parts skipped.
    pub fn arguments(&self, progress_flag: Option<&str>) -> String {
        let mut parts: Vec<&str> = vec![
            self.subcommand.as_str(),
            self.source.as_str(),
            self.destination.as_str(),
        ];
        if let Some(flag) = progress_flag {
            parts.push(flag);
        }
        parts.extend(self.flags.iter().map(String::as_str));
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }
}
