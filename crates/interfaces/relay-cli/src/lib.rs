pub mod commands;

use clap::ValueEnum;
use relay_core::{Subcommand, TransferUnit};

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum CliUnit {
    #[value(name = "B", alias = "bytes")]
    Bytes,
    #[value(name = "MB", alias = "megabytes")]
    Megabytes,
}

impl From<CliUnit> for TransferUnit {
    fn from(u: CliUnit) -> Self {
        match u {
            CliUnit::Bytes => TransferUnit::Bytes,
            CliUnit::Megabytes => TransferUnit::Megabytes,
        }
    }
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum CliTransfer {
    Copy,
    Move,
    Sync,
    Bisync,
    Copyto,
    Copyurl,
}

impl From<CliTransfer> for Subcommand {
    fn from(t: CliTransfer) -> Self {
        match t {
            CliTransfer::Copy => Subcommand::Copy,
            CliTransfer::Move => Subcommand::Move,
            CliTransfer::Sync => Subcommand::Sync,
            CliTransfer::Bisync => Subcommand::Bisync,
            CliTransfer::Copyto => Subcommand::Copyto,
            CliTransfer::Copyurl => Subcommand::Copyurl,
        }
    }
}
