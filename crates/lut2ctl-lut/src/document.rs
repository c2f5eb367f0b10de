//! Parsed-but-unprocessed LUT representation.
//!
//! A [`LutDocument`] is the output of one parse call: directive values plus
//! the raw sample rows, in source order, before any normalization. Row order
//! carries positional meaning for grid reconstruction and is preserved
//! exactly.

use std::fmt;

/// Source LUT dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutKind {
    /// Autodesk/Lustre `.3dl` text format.
    ThreeDl,
    /// Adobe/Resolve `.cube` text format.
    Cube,
}

/// A non-fatal problem found while parsing.
///
/// Malformed rows and inconsistent declarations are collected here instead
/// of aborting the parse; a single bad line must not abort conversion of an
/// otherwise-valid large table.
#[derive(Debug, Clone)]
pub struct ParseWarning {
    /// 1-based source line number.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// The parsed-but-unprocessed representation of one LUT file.
///
/// Created once per parse call, immutable thereafter, and consumed by
/// exactly one grid-builder invocation.
#[derive(Debug, Clone)]
pub struct LutDocument {
    /// Which dialect produced this document.
    pub kind: LutKind,
    /// Display title (`TITLE` directive, Cube only).
    pub title: Option<String>,
    /// Declared grid dimensions. Zeros mean "infer from sample count".
    /// For a 1D table the first component is the declared length.
    pub declared_size: [usize; 3],
    /// True when the source declares a 1D table (`LUT_1D_SIZE`).
    pub is_1d: bool,
    /// Input bit depth (3DL only; default 10).
    pub input_depth: u32,
    /// Output bit depth (3DL only; default 10).
    pub output_depth: u32,
    /// Input domain minimum per channel.
    pub domain_min: [f64; 3],
    /// Input domain maximum per channel.
    pub domain_max: [f64; 3],
    /// True when the domain came from explicit directives rather than the
    /// (0,0,0)/(1,1,1) defaults. Declared domains win over CLI overrides.
    pub domain_declared: bool,
    /// Raw 1D pre-spline values (3DL only; empty when the file has none).
    pub spline: Vec<f64>,
    /// Raw sample rows in source order. A malformed row occupies its
    /// position as `[0.0; 3]` so later rows keep their grid slots.
    pub rows: Vec<[f64; 3]>,
    /// Warnings collected during parsing.
    pub warnings: Vec<ParseWarning>,
}

impl LutDocument {
    /// Creates an empty document with the dialect defaults.
    pub fn new(kind: LutKind) -> Self {
        Self {
            kind,
            title: None,
            declared_size: [0, 0, 0],
            is_1d: false,
            input_depth: 10,
            output_depth: 10,
            domain_min: [0.0, 0.0, 0.0],
            domain_max: [1.0, 1.0, 1.0],
            domain_declared: false,
            spline: Vec::new(),
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Product of the declared dimensions (0 when undeclared).
    #[inline]
    pub fn declared_product(&self) -> usize {
        self.declared_size[0] * self.declared_size[1] * self.declared_size[2]
    }
}

/// Classification of one source line.
///
/// Every line is classified exactly once; directive matches return their
/// captured values inside the variant instead of leaving them in shared
/// match state.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LineClass {
    /// Whitespace-only line.
    Blank,
    /// Line whose first non-space character is `#`.
    Comment,
    /// A recognized directive with its captured values.
    Directive(Directive),
    /// Anything else: a candidate sample row.
    Sample,
}

/// A directive recognized in either dialect, with captured values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Directive {
    /// 3DL `Dimensions WxHxD` / `Sample WxHxD`.
    Dimensions([usize; 3]),
    /// 3DL `Input bit depth N`.
    InputDepth(u32),
    /// 3DL `Output bit depth N`.
    OutputDepth(u32),
    /// Cube `TITLE "..."`.
    Title(String),
    /// Cube `DOMAIN_MIN r g b`.
    DomainMin([f64; 3]),
    /// Cube `DOMAIN_MAX r g b`.
    DomainMax([f64; 3]),
    /// Cube `LUT_1D_SIZE N`.
    Size1D(usize),
    /// Cube `LUT_3D_SIZE N`.
    Size3D(usize),
    /// Bare `CUBE` marker line.
    CubeToken,
}

/// Parses one numeric sample token: signed decimal, optional exponent.
///
/// `inf`/`nan` spellings are rejected (they are not numeric tokens in
/// either dialect); exponent overflow still produces an infinity, which the
/// grid builder rejects as a non-finite sample.
pub(crate) fn parse_token(tok: &str) -> Option<f64> {
    if tok
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    tok.parse::<f64>().ok()
}

/// Parses a sample row: exactly three numeric tokens.
pub(crate) fn parse_row(line: &str) -> Option<[f64; 3]> {
    let mut vals = [0.0_f64; 3];
    let mut count = 0;
    for tok in line.split_whitespace() {
        if count == 3 {
            return None;
        }
        vals[count] = parse_token(tok)?;
        count += 1;
    }
    if count == 3 { Some(vals) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_accepts_signed_and_exponent_tokens() {
        assert_eq!(parse_row("0 512 1023"), Some([0.0, 512.0, 1023.0]));
        assert_eq!(parse_row(" -0.5 +1e-3 2.0E2 "), Some([-0.5, 0.001, 200.0]));
    }

    #[test]
    fn row_rejects_wrong_token_count() {
        assert_eq!(parse_row("0.1 0.2"), None);
        assert_eq!(parse_row("0.1 0.2 0.3 0.4"), None);
        assert_eq!(parse_row(""), None);
    }

    #[test]
    fn row_rejects_non_numeric_tokens() {
        assert_eq!(parse_row("a b c"), None);
        assert_eq!(parse_row("0.1 inf 0.3"), None);
        assert_eq!(parse_row("0.1 nan 0.3"), None);
    }

    #[test]
    fn document_defaults() {
        let doc = LutDocument::new(LutKind::ThreeDl);
        assert_eq!(doc.input_depth, 10);
        assert_eq!(doc.output_depth, 10);
        assert_eq!(doc.domain_min, [0.0, 0.0, 0.0]);
        assert_eq!(doc.domain_max, [1.0, 1.0, 1.0]);
        assert!(!doc.domain_declared);
        assert_eq!(doc.declared_product(), 0);
    }
}
