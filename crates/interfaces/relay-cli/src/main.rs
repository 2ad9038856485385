use clap::{Parser, Subcommand};
use relay_cli::{commands, CliTransfer, CliUnit};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(long, global = true, env = "RELAY_RCLONE", help = "Path to the rclone binary")]
    binary: Option<String>,
    #[arg(long, global = true, value_enum, default_value_t = CliUnit::Bytes)]
    unit: CliUnit,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a transfer (copy, move, sync, ...) with a live progress bar
    Transfer {
        #[arg(value_enum)]
        kind: CliTransfer,
        source: String,
        destination: String,
        #[arg(last = true, help = "Extra rclone flags")]
        flags: Vec<String>,
    },
    Size {
        path: String,
        #[arg(long)]
        json: bool,
    },
    Ls {
        path: String,
    },
    Lsjson {
        path: String,
        #[arg(short = 'R', long)]
        recursive: bool,
    },
    Config {
        action: String,
    },
    /// Pass a complete command line straight to rclone
    Exec {
        #[arg(last = true, required = true)]
        words: Vec<String>,
    },
    Delete {
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let rclone = commands::build_rclone(cli.binary, cli.unit, cli.verbose)?;

    match cli.command {
        Commands::Transfer {
            kind,
            source,
            destination,
            flags,
        } => commands::cmd_transfer(rclone, kind.into(), source, destination, flags).await?,
        Commands::Size { path, json } => commands::cmd_size(&rclone, &path, json)?,
        Commands::Ls { path } => commands::cmd_ls(&rclone, &path)?,
        Commands::Lsjson { path, recursive } => commands::cmd_lsjson(&rclone, &path, recursive)?,
        Commands::Config { action } => commands::cmd_config(&rclone, &action)?,
        Commands::Exec { words } => commands::cmd_exec(&rclone, &words)?,
        Commands::Delete { path } => commands::cmd_delete(&rclone, &path)?,
    }

    Ok(())
}
