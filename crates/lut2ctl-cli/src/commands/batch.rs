//! Batch conversion command

use crate::BatchArgs;
use anyhow::{Result, bail};
use lut2ctl_lut::NormalizationOptions;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: BatchArgs, verbose: bool) -> Result<()> {
    let files: Vec<PathBuf> = glob::glob(&args.pattern)?
        .filter_map(|r| r.ok())
        .collect();

    if files.is_empty() {
        bail!("No files match pattern: {}", args.pattern);
    }

    if verbose {
        println!("Found {} files matching '{}'", files.len(), args.pattern);
    }

    std::fs::create_dir_all(&args.output_dir)?;

    // Every conversion is an isolated pipeline with no shared state.
    let results: Vec<Result<()>> = files
        .par_iter()
        .map(|input| process_file(input, &args.output_dir, args.format.as_deref(), verbose))
        .collect();

    let mut success = 0;
    let mut failed = 0;
    for r in results {
        match r {
            Ok(_) => success += 1,
            Err(e) => {
                failed += 1;
                eprintln!("Error: {}", e);
            }
        }
    }

    info!(success, failed, "batch conversion complete");
    println!("Processed: {} success, {} failed", success, failed);

    if failed > 0 {
        bail!("{} files failed", failed);
    }

    Ok(())
}

fn process_file(
    input: &Path,
    output_dir: &Path,
    format: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let dialect = format.unwrap_or(ext.as_str());

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let output = output_dir.join(format!("{stem}.ctl"));

    match dialect {
        "3dl" | "threedl" => super::threedl::convert_file(
            input,
            &output,
            &NormalizationOptions::threedl(),
            verbose,
        ),
        "cube" => super::cube::convert_file(input, &output, &NormalizationOptions::cube(), verbose),
        other => bail!("Unsupported LUT format: '{other}' ({})", input.display()),
    }
}
