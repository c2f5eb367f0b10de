//! Grid construction and sample normalization.
//!
//! Consumes a [`LutDocument`], validates declared dimensions against the
//! actual sample count, infers missing dimensions, and produces a
//! [`SampleGrid`] of normalized float values ready for emission.

use crate::document::LutDocument;
use crate::error::GridError;

/// Options controlling sample normalization.
#[derive(Debug, Clone)]
pub struct NormalizationOptions {
    /// Divisor for 3D samples. `None` selects the auto-detected tier
    /// (1023 / 2047 / 4095) from the observed peak magnitude.
    pub max_value_override: Option<f64>,
    /// Divisor for 1D spline values.
    pub max_spline_value: f64,
    /// Domain bounds used when the document declares none.
    pub domain_override: Option<([f64; 3], [f64; 3])>,
}

impl NormalizationOptions {
    /// Defaults for the 3DL dialect: integer samples, 10-bit spline.
    pub fn threedl() -> Self {
        Self {
            max_value_override: None,
            max_spline_value: 1023.0,
            domain_override: None,
        }
    }

    /// Defaults for the CUBE dialect: float samples, no depth division.
    pub fn cube() -> Self {
        Self {
            max_value_override: Some(1.0),
            max_spline_value: 1.0,
            domain_override: None,
        }
    }
}

/// Normalized 1D spline values.
///
/// The Cube 1D dialect can carry distinct per-channel curves; when all
/// three channels agree a single shared sequence suffices.
#[derive(Debug, Clone)]
pub enum Spline1D {
    /// One curve applied to every channel.
    Shared(Vec<f64>),
    /// Independent per-channel curves of equal length.
    Rgb {
        /// Red channel values.
        r: Vec<f64>,
        /// Green channel values.
        g: Vec<f64>,
        /// Blue channel values.
        b: Vec<f64>,
    },
}

impl Spline1D {
    /// Number of entries per channel.
    pub fn len(&self) -> usize {
        match self {
            Spline1D::Shared(v) => v.len(),
            Spline1D::Rgb { r, .. } => r.len(),
        }
    }

    /// True when the spline holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A normalized 1D lookup grid.
#[derive(Debug, Clone)]
pub struct SplineGrid {
    /// Normalized values.
    pub values: Spline1D,
    /// Input domain minimum per channel.
    pub domain_min: [f64; 3],
    /// Input domain maximum per channel.
    pub domain_max: [f64; 3],
    /// Divisor applied to the raw values.
    pub scale_divisor: f64,
}

/// A normalized 3D lookup grid.
///
/// Values are stored densely with x varying slowest and z fastest, the
/// physical row order of both source dialects.
#[derive(Debug, Clone)]
pub struct CubeGrid {
    /// Grid dimensions.
    pub size: [usize; 3],
    /// Dense cell values, `size[0] * size[1] * size[2]` entries.
    pub values: Vec<[f64; 3]>,
    /// Input domain minimum per channel.
    pub domain_min: [f64; 3],
    /// Input domain maximum per channel.
    pub domain_max: [f64; 3],
    /// Divisor applied to the raw samples.
    pub scale_divisor: f64,
}

impl CubeGrid {
    /// Value at grid cell (x, y, z).
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> [f64; 3] {
        self.values[(x * self.size[1] + y) * self.size[2] + z]
    }
}

/// The normalized, structurally-validated output of grid construction.
///
/// A 3DL document yields a spline and a cube; a Cube 1D document yields
/// only a spline; a Cube 3D document yields only a cube. Immutable once
/// built and consumed by exactly one emitter invocation.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    /// The 1D part, when present.
    pub spline: Option<SplineGrid>,
    /// The 3D part, when present.
    pub cube: Option<CubeGrid>,
    /// Peak truncated sample magnitude seen by auto-detection.
    pub observed_max: Option<i64>,
    /// True when declared dimensions had to be corrected.
    pub corrected: bool,
    /// Non-fatal problems found during construction.
    pub warnings: Vec<String>,
}

/// Builds a normalized grid from a parsed document.
pub fn build(doc: &LutDocument, opts: &NormalizationOptions) -> Result<SampleGrid, GridError> {
    if doc.rows.is_empty() && doc.spline.is_empty() {
        return Err(GridError::RowCountZero);
    }
    check_finite(doc)?;

    // Declared domains win over CLI overrides, which win over defaults.
    let (domain_min, domain_max) = if doc.domain_declared {
        (doc.domain_min, doc.domain_max)
    } else {
        opts.domain_override
            .unwrap_or((doc.domain_min, doc.domain_max))
    };

    if doc.is_1d {
        build_1d(doc, opts, domain_min, domain_max)
    } else {
        build_3d(doc, opts, domain_min, domain_max)
    }
}

/// Cube 1D dialect: the rows themselves are the per-channel spline.
fn build_1d(
    doc: &LutDocument,
    opts: &NormalizationOptions,
    domain_min: [f64; 3],
    domain_max: [f64; 3],
) -> Result<SampleGrid, GridError> {
    if doc.rows.is_empty() {
        return Err(GridError::RowCountZero);
    }
    let mut warnings = Vec::new();
    let mut corrected = false;

    let declared = doc.declared_size[0];
    if declared != 0 && declared != doc.rows.len() {
        warnings.push(format!(
            "declared 1D size {declared} does not match {} sample rows, using the row count",
            doc.rows.len()
        ));
        corrected = true;
    }

    let div = opts.max_spline_value;
    let shared = doc.rows.iter().all(|row| row[0] == row[1] && row[1] == row[2]);
    let values = if shared {
        Spline1D::Shared(doc.rows.iter().map(|row| row[0] / div).collect())
    } else {
        Spline1D::Rgb {
            r: doc.rows.iter().map(|row| row[0] / div).collect(),
            g: doc.rows.iter().map(|row| row[1] / div).collect(),
            b: doc.rows.iter().map(|row| row[2] / div).collect(),
        }
    };

    Ok(SampleGrid {
        spline: Some(SplineGrid {
            values,
            domain_min,
            domain_max,
            scale_divisor: div,
        }),
        cube: None,
        observed_max: None,
        corrected,
        warnings,
    })
}

/// 3D path, with an optional leading spline (3DL dialect).
fn build_3d(
    doc: &LutDocument,
    opts: &NormalizationOptions,
    domain_min: [f64; 3],
    domain_max: [f64; 3],
) -> Result<SampleGrid, GridError> {
    if doc.rows.is_empty() {
        return Err(GridError::RowCountZero);
    }
    let mut warnings = Vec::new();
    let mut corrected = false;

    let declared = doc.declared_size;
    let product = doc.declared_product();
    let size = if product != 0 && product == doc.rows.len() {
        declared
    } else {
        let n = (doc.rows.len() as f64).cbrt().round() as usize;
        if product != 0 {
            warnings.push(format!(
                "{} sample rows do not fill the declared {}x{}x{} cube, using {n}x{n}x{n}",
                doc.rows.len(),
                declared[0],
                declared[1],
                declared[2]
            ));
            corrected = true;
        }
        [n, n, n]
    };

    let mut observed_max = None;
    let divisor = match opts.max_value_override {
        Some(v) => v,
        None => {
            // Peak scan truncates toward zero before comparing, like the
            // original integer-only encodings assume. Fractional samples
            // can misclassify; that behavior is deliberate.
            let mut max = 0_i64;
            for row in &doc.rows {
                for &c in row {
                    let t = c as i64;
                    if t > max {
                        max = t;
                    }
                }
            }
            observed_max = Some(max);
            let mut d = 1023.0;
            if max > 1023 {
                d = 2047.0;
            }
            if max > 2047 {
                d = 4095.0;
            }
            d
        }
    };

    // Rows fill the grid x-outer, y-middle, z-inner with 1-based counters.
    // A short row sequence zero-fills the tail; extra rows are ignored.
    let total = size[0] * size[1] * size[2];
    let mut values = Vec::with_capacity(total);
    for _x in 1..=size[0] {
        for _y in 1..=size[1] {
            for _z in 1..=size[2] {
                let raw = doc.rows.get(values.len()).copied().unwrap_or([0.0; 3]);
                values.push([
                    domain_max[0] * raw[0] / divisor,
                    domain_max[1] * raw[1] / divisor,
                    domain_max[2] * raw[2] / divisor,
                ]);
            }
        }
    }

    let spline = if doc.spline.is_empty() {
        None
    } else {
        // The 3DL pre-spline is always a shared curve over a fixed 0..1
        // domain, truncated to integers before division.
        let vals: Vec<f64> = doc
            .spline
            .iter()
            .map(|v| v.trunc() / opts.max_spline_value)
            .collect();
        Some(SplineGrid {
            values: Spline1D::Shared(vals),
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            scale_divisor: opts.max_spline_value,
        })
    };

    Ok(SampleGrid {
        spline,
        cube: Some(CubeGrid {
            size,
            values,
            domain_min,
            domain_max,
            scale_divisor: divisor,
        }),
        observed_max,
        corrected,
        warnings,
    })
}

fn check_finite(doc: &LutDocument) -> Result<(), GridError> {
    if doc.spline.iter().any(|v| !v.is_finite()) {
        return Err(GridError::NonFiniteValue { row: 1 });
    }
    for (i, row) in doc.rows.iter().enumerate() {
        if row.iter().any(|v| !v.is_finite()) {
            return Err(GridError::NonFiniteValue { row: i + 1 });
        }
    }
    Ok(())
}
