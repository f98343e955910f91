mod cli;

use bedgen::error::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use std::path::PathBuf;

/// Write genotype matrices as PLINK .bed files.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a random genotype matrix and write it as .bed.
    Random {
        /// Number of individuals (rows).
        #[arg(short = 'n', long)]
        n_individuals: usize,

        /// Number of markers (columns).
        #[arg(short = 'p', long)]
        n_markers: usize,

        /// Build the whole matrix in memory before writing instead of streaming markers.
        #[arg(long)]
        materialize: bool,

        /// Seed for the random number generator.
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Encode an individuals x markers .npy matrix (0/1/2, NaN = missing) as .bed.
    Convert {
        /// Input .npy file holding f64 dosages.
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Output .bed path.
    #[arg(
        short,
        long,
        value_hint = clap::ValueHint::FilePath,
        default_value_t = format!("bedgen_{}.bed", Local::now().format("%Y%m%d_%H%M%S"))
    )]
    output: String,

    /// Omit the 3-byte magic header.
    #[arg(long)]
    no_header: bool,

    /// Also write placeholder .fam and .bim files next to the .bed.
    #[arg(long)]
    sidecars: bool,
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    cli::run(&args.command)
}

fn main() -> miette::Result<()> {
    try_main().into_diagnostic()
}
