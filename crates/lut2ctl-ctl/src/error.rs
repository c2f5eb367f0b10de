//! Emission error types.

use thiserror::Error;

/// Errors that can occur while emitting a CTL program.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Neither a 1D spline nor a 3D cube grid was supplied.
    #[error("nothing to emit: neither a spline nor a cube grid is populated")]
    NothingToEmit,
}
