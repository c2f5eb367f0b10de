//! lut2ctl - LUT to CTL command-line converter
//!
//! Converts .3dl and .cube color look-up tables into CTL transform source.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "lut2ctl")]
#[command(author, version, about = "LUT to CTL command-line converter")]
#[command(long_about = "
Converts color look-up tables into CTL transform source.

Examples:
  lut2ctl threedl grade.3dl grade.ctl
  lut2ctl threedl --max-value 4095 film.3dl film.ctl
  lut2ctl cube tint.cube LMT.tint.ctl
  lut2ctl cube --min 0,0,0 --max 1,1,1 look.cube look.ctl
  lut2ctl batch 'luts/*.cube' -o ctl/
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an Autodesk/Lustre .3dl LUT
    #[command(visible_alias = "3dl")]
    Threedl(ThreedlArgs),

    /// Convert an Adobe/Resolve .cube LUT
    Cube(CubeArgs),

    /// Convert many LUTs in parallel
    Batch(BatchArgs),
}

#[derive(Args)]
struct ThreedlArgs {
    /// Input .3dl file
    input: PathBuf,

    /// Output CTL file (.ctl is appended when missing)
    output: PathBuf,

    /// Minimum red,green,blue values
    #[arg(long, value_name = "r,g,b", default_value = "0,0,0")]
    min: String,

    /// Maximum red,green,blue values
    #[arg(long, value_name = "r,g,b", default_value = "1,1,1")]
    max: String,

    /// Maximum value in the 3D LUT (0 = auto-detect)
    #[arg(long, default_value = "0")]
    max_value: f64,

    /// Maximum value in the 1D LUT
    #[arg(long, default_value = "1023")]
    max_value_spline: f64,
}

#[derive(Args)]
struct CubeArgs {
    /// Input .cube file
    input: PathBuf,

    /// Output CTL file (.ctl is appended when missing)
    output: PathBuf,

    /// Minimum red,green,blue values
    #[arg(long, value_name = "r,g,b", default_value = "0,0,0")]
    min: String,

    /// Maximum red,green,blue values
    #[arg(long, value_name = "r,g,b", default_value = "1,1,1")]
    max: String,

    /// Maximum value in the 1D LUT
    #[arg(long, default_value = "1")]
    max_value_spline: f64,
}

#[derive(Args)]
struct BatchArgs {
    /// Input pattern (glob)
    pattern: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Force a dialect (3dl, cube) instead of detecting by extension
    #[arg(long)]
    format: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Threedl(args) => commands::threedl::run(args, cli.verbose),
        Commands::Cube(args) => commands::cube::run(args, cli.verbose),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose),
    }
}
