//! LUT parsing and grid errors.

use thiserror::Error;

/// Result type for LUT parsing.
pub type LutResult<T> = Result<T, ParseError>;

/// Errors that can occur while parsing a LUT source text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No sample rows survived comment/directive stripping.
    #[error("empty input: no sample rows after stripping comments and directives")]
    EmptyInput,

    /// A recognized directive keyword carried an unreadable value.
    #[error("line {line}: unreadable directive: {text}")]
    BadDirective {
        /// 1-based source line number
        line: usize,
        /// The offending line text
        text: String,
    },

    /// I/O error while reading a LUT file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while building a grid from a parsed document.
#[derive(Debug, Error)]
pub enum GridError {
    /// The document has no sample rows at all.
    #[error("cannot build a grid from zero sample rows")]
    RowCountZero,

    /// A sample value is NaN or infinite.
    #[error("non-finite sample value in row {row}")]
    NonFiniteValue {
        /// 1-based row number within the sample sequence
        row: usize,
    },
}
