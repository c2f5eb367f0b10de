//! # lut2ctl-ctl
//!
//! CTL program emission for converted LUT grids.
//!
//! Takes the normalized grids produced by `lut2ctl-lut` and serializes a
//! CTL source text: header comments, `const float` array literals, and a
//! fixed-signature `main` that performs the 1D spline lookup, the 3D
//! trilinear cube lookup, or both chained.
//!
//! ```rust
//! use lut2ctl_ctl::{emit, AxisOrder, EmissionMeta};
//! use lut2ctl_lut::{parse, LutKind, NormalizationOptions, grid};
//!
//! let src = "LUT_3D_SIZE 2\n\
//!            0 0 0\n1 0 0\n0 1 0\n1 1 0\n\
//!            0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
//! let doc = parse(src, LutKind::Cube).unwrap();
//! let g = grid::build(&doc, &NormalizationOptions::cube()).unwrap();
//! let meta = EmissionMeta {
//!     source_name: "identity.cube".into(),
//!     title: doc.title.clone(),
//!     order: AxisOrder::ZOuter,
//! };
//! let ctl = emit(g.spline.as_ref(), g.cube.as_ref(), &meta).unwrap();
//! assert!(ctl.contains("lookup3D_f"));
//! ```
//!
//! The emitter never touches the filesystem; writing the returned string
//! is the caller's responsibility.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod program;

pub use error::EmitError;
pub use program::{AxisOrder, EmissionMeta, emit};
