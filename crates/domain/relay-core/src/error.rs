use camino::Utf8PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("rclone binary not found at {0}")]
    BinaryNotFound(Utf8PathBuf),
    #[error("`{0}` requires passing a destination")]
    MissingDestination(String),
    #[error("`{0}` is a protected command, use `execute()` instead")]
    ProtectedCommand(String),
    #[error("unexpected `{subcommand}` output: {reason}")]
    OutputFormat { subcommand: String, reason: String },
    #[error("expected {expected} output, got {found}")]
    UnexpectedOutput {
        expected: &'static str,
        found: &'static str,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayErrorKind {
    Configuration,
    Usage,
    Guarded,
    OutputFormat,
    Io,
}

impl RelayError {
    pub fn kind(&self) -> RelayErrorKind {
        match self {
            RelayError::BinaryNotFound(_) => RelayErrorKind::Configuration,
            RelayError::MissingDestination(_) => RelayErrorKind::Usage,
            RelayError::ProtectedCommand(_) => RelayErrorKind::Guarded,
            RelayError::OutputFormat { .. }
            | RelayError::UnexpectedOutput { .. }
            | RelayError::Json(_) => RelayErrorKind::OutputFormat,
            RelayError::Io(_) => RelayErrorKind::Io,
        }
    }

    pub(crate) fn format(subcommand: &str, reason: impl Into<String>) -> Self {
        RelayError::OutputFormat {
            subcommand: subcommand.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_error_taxonomy() {
        assert_eq!(
            RelayError::MissingDestination("copy".into()).kind(),
            RelayErrorKind::Usage
        );
        assert_eq!(
            RelayError::ProtectedCommand("delete".into()).kind(),
            RelayErrorKind::Guarded
        );
        assert_eq!(
            RelayError::format("size", "missing count").kind(),
            RelayErrorKind::OutputFormat
        );
        assert_eq!(
            RelayError::BinaryNotFound("/x".into()).kind(),
            RelayErrorKind::Configuration
        );
    }
}
