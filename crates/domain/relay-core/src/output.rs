use crate::{CommandInvocation, RelayError, Subcommand};
use serde::{Deserialize, Serialize};

const OBJECTS_LABEL: &str = "Total objects: ";
const SIZE_LABEL: &str = "Total size: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSummary {
    pub total_objects: u64,
    /// Exact byte count.
    pub total_size: u64,
}

/// Structured result of a finished invocation. Which variant to expect depends on
/// the subcommand.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Size(SizeSummary),
    Json(serde_json::Value),
    Lines(Vec<String>),
    Text(String),
}

impl CommandOutput {
    pub fn kind(&self) -> &'static str {
        match self {
            CommandOutput::Size(_) => "size",
            CommandOutput::Json(_) => "json",
            CommandOutput::Lines(_) => "lines",
            CommandOutput::Text(_) => "text",
        }
    }

    pub fn into_size(self) -> Result<SizeSummary, RelayError> {
        match self {
            CommandOutput::Size(s) => Ok(s),
            other => Err(other.mismatch("size")),
        }
    }

    pub fn into_json(self) -> Result<serde_json::Value, RelayError> {
        match self {
            CommandOutput::Json(v) => Ok(v),
            other => Err(other.mismatch("json")),
        }
    }

    pub fn into_lines(self) -> Result<Vec<String>, RelayError> {
        match self {
            CommandOutput::Lines(l) => Ok(l),
            other => Err(other.mismatch("lines")),
        }
    }

    pub fn into_text(self) -> Result<String, RelayError> {
        match self {
            CommandOutput::Text(t) => Ok(t),
            other => Err(other.mismatch("text")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> RelayError {
        RelayError::UnexpectedOutput {
            expected,
            found: self.kind(),
        }
    }
}

/// Turns the complete output of `invocation` into its documented shape.
///
/// `arguments` is the command line minus the executable path.
pub fn shape_output(
    invocation: &CommandInvocation,
    arguments: &str,
    text: String,
) -> Result<CommandOutput, RelayError> {
    match &invocation.subcommand {
        Subcommand::Size => parse_size_summary(&text).map(CommandOutput::Size),
        Subcommand::Lsjson => Ok(CommandOutput::Json(serde_json::from_str(&text)?)),
        Subcommand::Lsf => Ok(CommandOutput::Lines(
            text.trim_end().split('\n').map(str::to_string).collect(),
        )),
        _ if invocation.raw => Ok(CommandOutput::Text(text.trim().replace('\t', " "))),
        Subcommand::Config if arguments.contains("file") => Ok(CommandOutput::Text(
            text.trim()
                .rsplit('\n')
                .next()
                .unwrap_or_default()
                .to_string(),
        )),
        _ => Ok(CommandOutput::Text(text)),
    }
}

/// Reads the exact counts rclone prints in parentheses, e.g.
/// `Total size: 1 MiB (1048576 Byte)` or `Total size: 1048576 Byte (1048576)`.
pub fn parse_size_summary(text: &str) -> Result<SizeSummary, RelayError> {
    Ok(SizeSummary {
        total_objects: labelled_count(text, OBJECTS_LABEL)?,
        total_size: labelled_count(text, SIZE_LABEL)?,
    })
}

fn labelled_count(text: &str, label: &str) -> Result<u64, RelayError> {
    let missing = || RelayError::format("size", format!("missing `{}` count", label.trim()));

    let (_, after) = text.split_once(label).ok_or_else(missing)?;
    let (_, inner) = after.split_once(" (").ok_or_else(missing)?;
    let (count, _) = inner.split_once(')').ok_or_else(missing)?;
    let count = count.split(" Byte").next().unwrap_or(count).trim();

    count.parse::<u64>().map_err(|e| {
        RelayError::format("size", format!("bad `{}` count {count:?}: {e}", label.trim()))
    })
}
