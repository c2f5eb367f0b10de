//! CLI command implementations

pub mod batch;
pub mod cube;
pub mod threedl;

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// Parses a comma-separated `r,g,b` triple.
pub fn parse_triple(s: &str) -> Result<[f64; 3]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        bail!("expected r,g,b but got '{s}'");
    }
    let mut out = [0.0_f64; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("bad component '{part}' in '{s}'"))?;
    }
    Ok(out)
}

/// Appends `.ctl` when the output path does not already end in it.
pub fn ensure_ctl_extension(path: &Path) -> PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some("ctl") {
        path.to_path_buf()
    } else {
        let mut s = path.as_os_str().to_os_string();
        s.push(".ctl");
        PathBuf::from(s)
    }
}
