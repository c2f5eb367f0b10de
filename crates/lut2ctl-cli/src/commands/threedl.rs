//! 3DL conversion command

use crate::ThreedlArgs;
use anyhow::{Context, Result};
use lut2ctl_ctl::{AxisOrder, EmissionMeta, emit};
use lut2ctl_lut::{NormalizationOptions, grid, threedl};
use std::fs;
use std::path::Path;
use tracing::warn;

pub fn run(args: ThreedlArgs, verbose: bool) -> Result<()> {
    let min = super::parse_triple(&args.min)?;
    let max = super::parse_triple(&args.max)?;
    let output = super::ensure_ctl_extension(&args.output);

    let mut opts = NormalizationOptions::threedl();
    opts.max_spline_value = args.max_value_spline;
    if args.max_value > 0.0 {
        opts.max_value_override = Some(args.max_value);
    }
    opts.domain_override = Some((min, max));

    convert_file(&args.input, &output, &opts, verbose)
}

/// Converts one .3dl file; shared with the batch command.
pub fn convert_file(
    input: &Path,
    output: &Path,
    opts: &NormalizationOptions,
    verbose: bool,
) -> Result<()> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;
    let doc = threedl::parse(&source)
        .with_context(|| format!("Failed to parse: {}", input.display()))?;
    for w in &doc.warnings {
        warn!("{}: {}", input.display(), w);
    }

    let sample_grid = grid::build(&doc, opts)
        .with_context(|| format!("Failed to build grid: {}", input.display()))?;
    for w in &sample_grid.warnings {
        warn!("{}: {}", input.display(), w);
    }

    let meta = EmissionMeta {
        source_name: input.display().to_string(),
        title: doc.title.clone(),
        order: AxisOrder::XOuter,
    };
    let text = emit(sample_grid.spline.as_ref(), sample_grid.cube.as_ref(), &meta)
        .with_context(|| format!("Failed to emit: {}", input.display()))?;
    fs::write(output, text)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    println!("{} -> {}", input.display(), output.display());
    if let (Some(observed), Some(cube)) = (sample_grid.observed_max, sample_grid.cube.as_ref()) {
        println!(
            "MAXIMUM VALUE IN 3D LUT {}, using {}",
            observed, cube.scale_divisor
        );
    }
    if verbose {
        println!("Done.");
    }

    Ok(())
}
