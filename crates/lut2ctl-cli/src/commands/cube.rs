//! CUBE conversion command

use crate::CubeArgs;
use anyhow::{Context, Result};
use lut2ctl_ctl::{AxisOrder, EmissionMeta, emit};
use lut2ctl_lut::{NormalizationOptions, cube, grid};
use std::fs;
use std::path::Path;
use tracing::warn;

pub fn run(args: CubeArgs, verbose: bool) -> Result<()> {
    let min = super::parse_triple(&args.min)?;
    let max = super::parse_triple(&args.max)?;
    let output = super::ensure_ctl_extension(&args.output);

    let mut opts = NormalizationOptions::cube();
    opts.max_spline_value = args.max_value_spline;
    opts.domain_override = Some((min, max));

    convert_file(&args.input, &output, &opts, verbose)
}

/// Converts one .cube file; shared with the batch command.
pub fn convert_file(
    input: &Path,
    output: &Path,
    opts: &NormalizationOptions,
    verbose: bool,
) -> Result<()> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;
    let doc = cube::parse(&source)
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
        order: AxisOrder::ZOuter,
    };
    let text = emit(sample_grid.spline.as_ref(), sample_grid.cube.as_ref(), &meta)
        .with_context(|| format!("Failed to emit: {}", input.display()))?;
    fs::write(output, text)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    println!("{} -> {}", input.display(), output.display());
    if verbose {
        println!("Done.");
    }

    Ok(())
}
