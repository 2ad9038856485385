use crate::CliUnit;
use anyhow::{Context, Result};
use humansize::{format_size, DECIMAL};
use indicatif::{ProgressBar, ProgressStyle};
use relay_pipeline::{
    ChannelSink, CommandInvocation, ProgressEvent, Rclone, Subcommand, TransferUnit,
};

pub fn build_rclone(binary: Option<String>, unit: CliUnit, verbose: bool) -> Result<Rclone> {
    let mut builder = Rclone::builder().unit(unit.into()).debug(verbose);
    if let Some(path) = binary {
        builder = builder.binary(path);
    }
    builder.build().context("Failed to locate rclone")
}

/// Joins trailing CLI words back into one rclone command line.
pub fn join_command_line(words: &[String]) -> Result<String> {
    shlex::try_join(words.iter().map(String::as_str)).context("Command contains a NUL byte")
}

fn progress_bar(total: f64, unit: TransferUnit) -> ProgressBar {
    let template = match unit {
        TransferUnit::Bytes => {
            "[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {bytes_per_sec} ETA {eta}"
        }
        TransferUnit::Megabytes => {
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} MB ETA {eta}"
        }
    };
    let pb = ProgressBar::new(total.max(0.0).round() as u64);
    pb.set_style(
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}

pub async fn cmd_transfer(
    rclone: Rclone,
    subcommand: Subcommand,
    source: String,
    destination: String,
    flags: Vec<String>,
) -> Result<()> {
    println!(":: {} {} -> {}", subcommand, source, destination);

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let handle = tokio::task::spawn_blocking(move || {
        let mut sink = ChannelSink::new(tx);
        let invocation = CommandInvocation::new(subcommand)
            .source(source)
            .destination(destination)
            .flags(flags);
        rclone.run(invocation, &mut sink)
    });

    let mut pb: Option<ProgressBar> = None;
    let mut done = 0f64;

    while let Some(ev) = rx.recv().await {
        match ev {
            ProgressEvent::Started { total, unit } => {
                pb = Some(progress_bar(total, unit));
            }
            ProgressEvent::Advanced { delta } => {
                done += delta;
                if let Some(pb) = &pb {
                    pb.set_position(done.max(0.0).round() as u64);
                }
            }
            ProgressEvent::Message(line) => match &pb {
                Some(pb) => pb.println(line),
                None => eprintln!("{line}"),
            },
            ProgressEvent::Finished => {
                if let Some(pb) = &pb {
                    pb.finish_with_message("Transfer complete");
                }
            }
        }
    }

    let output = handle.await??.into_text()?;
    if pb.is_none() {
        print!("{output}");
    }
    Ok(())
}

pub fn cmd_size(rclone: &Rclone, path: &str, json: bool) -> Result<()> {
    let summary = rclone.size(path, &[])?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Total objects: {}", summary.total_objects);
        println!(
            "Total size:    {} ({} bytes)",
            format_size(summary.total_size, DECIMAL),
            summary.total_size
        );
    }
    Ok(())
}

pub fn cmd_ls(rclone: &Rclone, path: &str) -> Result<()> {
    for entry in rclone.ls(path, &[])? {
        println!("{entry}");
    }
    Ok(())
}

pub fn cmd_lsjson(rclone: &Rclone, path: &str, recursive: bool) -> Result<()> {
    let flags: &[&str] = if recursive { &["--recursive"] } else { &[] };
    let value = rclone.lsjson(path, flags)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub fn cmd_config(rclone: &Rclone, action: &str) -> Result<()> {
    println!("{}", rclone.config(action, &[])?);
    Ok(())
}

pub fn cmd_exec(rclone: &Rclone, words: &[String]) -> Result<()> {
    let line = join_command_line(words)?;
    println!("{}", rclone.execute(&line)?);
    Ok(())
}

pub fn cmd_delete(rclone: &Rclone, path: &str) -> Result<()> {
    rclone
        .delete(path, &[])
        .context("Refusing to delete; run `relay exec -- delete <path>` instead")
}
