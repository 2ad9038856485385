use std::fmt;

/// rclone subcommands with dedicated handling. Anything else is carried verbatim
/// in [`Subcommand::Other`] so new rclone verbs work without code changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subcommand {
    Copy,
    Move,
    Sync,
    Bisync,
    Copyto,
    Copyurl,
    Size,
    Lsjson,
    Ls,
    Lsf,
    Config,
    Delete,
    Other(String),
}

impl Subcommand {
    pub fn as_str(&self) -> &str {
        match self {
            Subcommand::Copy => "copy",
            Subcommand::Move => "move",
            Subcommand::Sync => "sync",
            Subcommand::Bisync => "bisync",
            Subcommand::Copyto => "copyto",
            Subcommand::Copyurl => "copyurl",
            Subcommand::Size => "size",
            Subcommand::Lsjson => "lsjson",
            Subcommand::Ls => "ls",
            Subcommand::Lsf => "lsf",
            Subcommand::Config => "config",
            Subcommand::Delete => "delete",
            Subcommand::Other(name) => name,
        }
    }

    /// Subcommands that move data and benefit from live progress.
    pub fn is_transfer(&self) -> bool {
        relay_config::is_transfer_subcommand(self.as_str())
    }

    /// Subcommands that cannot run without a destination operand.
    pub fn requires_destination(&self) -> bool {
        matches!(self, Subcommand::Copy | Subcommand::Move)
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Subcommand::Delete)
    }
}

impl From<&str> for Subcommand {
    fn from(name: &str) -> Self {
        match name {
            "copy" => Subcommand::Copy,
            "move" => Subcommand::Move,
            "sync" => Subcommand::Sync,
            "bisync" => Subcommand::Bisync,
            "copyto" => Subcommand::Copyto,
            "copyurl" => Subcommand::Copyurl,
            "size" => Subcommand::Size,
            "lsjson" => Subcommand::Lsjson,
            "ls" => Subcommand::Ls,
            "lsf" => Subcommand::Lsf,
            "config" => Subcommand::Config,
            "delete" => Subcommand::Delete,
            other => Subcommand::Other(other.to_string()),
        }
    }
}

impl From<String> for Subcommand {
    fn from(name: String) -> Self {
        Subcommand::from(name.as_str())
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
