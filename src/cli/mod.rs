// src/cli/mod.rs — CLI definition (clap derive)

pub mod predict;
pub mod schema;
pub mod serve;
pub mod unpack;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "session-scorer",
    about = "Target-action probability for site sessions",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default when no subcommand is given)
    Serve {
        /// Listen port, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,
        /// Listen host, overrides the config file
        #[arg(long)]
        host: Option<String>,
    },
    /// Score one session read as JSON from a file or stdin
    Predict {
        /// Input file (stdin when omitted or "-")
        #[arg(short, long)]
        input: Option<String>,
        /// Also print the feature row that was scored
        #[arg(long)]
        explain: bool,
    },
    /// Print the ordered feature columns the loaded artifacts expect
    Schema,
    /// Decompress .gz artifacts next to their configured paths
    Unpack,
}
