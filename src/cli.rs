//! Command-line arguments for pfsyncctl.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pfsync_nv::codec::WireRevision;

/// Inspect and edit a pfsync status document
#[derive(Parser, Debug)]
#[command(name = "pfsyncctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Status document (overrides `status_file` from the configuration)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Address wire revision: sockaddr, bare or bare-port
    #[arg(short, long, global = true)]
    pub revision: Option<WireRevision>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the status the way ifconfig shows it
    Show,

    /// Apply ifconfig-style commands and save the result
    ///
    /// Example: pfsyncctl set syncdev em0 syncpeer 192.0.2.1 maxupd 64 -defer
    Set {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        commands: Vec<String>,
    },

    /// Print the stored container document
    Dump,
}
