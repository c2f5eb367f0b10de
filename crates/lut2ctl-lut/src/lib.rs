//! # lut2ctl-lut
//!
//! LUT document parsing and grid normalization for CTL conversion.
//!
//! This crate covers the first two stages of the conversion pipeline:
//! parsing a `.3dl` or `.cube` source text into a [`LutDocument`], then
//! building a normalized [`SampleGrid`] from it. Emission of the CTL
//! program lives in `lut2ctl-ctl`.
//!
//! # Pipeline
//!
//! ```rust
//! use lut2ctl_lut::{parse, LutKind, NormalizationOptions, grid};
//!
//! let src = "LUT_3D_SIZE 2\n\
//!            0 0 0\n1 0 0\n0 1 0\n1 1 0\n\
//!            0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
//! let doc = parse(src, LutKind::Cube).unwrap();
//! let sample_grid = grid::build(&doc, &NormalizationOptions::cube()).unwrap();
//! assert!(sample_grid.cube.is_some());
//! ```
//!
//! # Warnings
//!
//! Parsing and grid construction are deliberately forgiving: malformed
//! rows and inconsistent declared dimensions become warnings, not errors,
//! so one bad line in a third-party export never aborts conversion of an
//! otherwise-valid table.
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `lut2ctl-ctl` - CTL program emission
//! - `lut2ctl-cli` - command-line converter

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod document;
mod error;
pub mod cube;
pub mod grid;
pub mod threedl;

pub use document::{LutDocument, LutKind, ParseWarning};
pub use error::{GridError, LutResult, ParseError};
pub use grid::{CubeGrid, NormalizationOptions, SampleGrid, Spline1D, SplineGrid};

/// Parses a LUT source text in the given dialect.
///
/// Dispatches to [`threedl::parse`] or [`cube::parse`].
pub fn parse(source: &str, kind: LutKind) -> LutResult<LutDocument> {
    match kind {
        LutKind::ThreeDl => threedl::parse(source),
        LutKind::Cube => cube::parse(source),
    }
}
