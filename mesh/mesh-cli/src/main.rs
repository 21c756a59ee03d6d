//! `stl2obj` - convert STL meshes to Wavefront OBJ.
//!
//! # Commands
//!
//! - `stl2obj convert <INPUTS>...` - Convert files and/or folders of STL files
//! - `stl2obj stats <INPUT>` - Load, merge and transform one file, print its metrics
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=debug` to see
//! every cleanup pass.

mod args;
mod convert;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{ConvertArgs, StatsArgs};

/// STL to OBJ converter
#[derive(Parser)]
#[command(name = "stl2obj")]
#[command(about = "Convert STL meshes to Wavefront OBJ", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert STL files (or every STL file in a folder) to OBJ
    Convert(ConvertArgs),

    /// Print vertex/face counts and bounds after merge and transform
    Stats(StatsArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => convert::run(&args),
        Commands::Stats(args) => stats::run(&args),
    }
}
