//! pfsyncctl entry point.

use anyhow::Context;
use clap::Parser;
use log::{debug, info};

mod cli;

use cli::{Cli, Commands};
use pfsync_nv::config::Config;
use pfsync_nv::ops::{apply_all, StatusCommand};
use pfsync_nv::store;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    // Load configuration, command-line flags win
    let mut cfg = Config::load()?;
    if let Some(file) = cli.file {
        cfg.status_file = file;
    }
    if let Some(revision) = cli.revision {
        cfg.wire_revision = revision;
    }
    debug!("Using config: {:?}", cfg);

    let codec = cfg.codec()?;

    match cli.command {
        Commands::Show => {
            let status = store::load(&cfg.status_file, &codec)?;
            print!("{}", status.report());
        }
        Commands::Set { commands } => {
            let commands = StatusCommand::parse_all(commands.as_slice())?;
            let status = store::load(&cfg.status_file, &codec)?;
            let status = apply_all(&status, &commands, codec.families())?;
            store::save(&cfg.status_file, &status, &codec)?;
            info!("Applied {} command(s)", commands.len());
            print!("{}", status.report());
        }
        Commands::Dump => {
            let nvl = store::read_document(&cfg.status_file)?.with_context(|| {
                format!("{} does not exist", cfg.status_file.display())
            })?;
            println!("{}", serde_json::to_string_pretty(&nvl)?);
        }
    }

    Ok(())
}
