//! Autodesk/Lustre .3dl LUT format support.
//!
//! A .3dl file is line-oriented text: header directives (often carried
//! inside `#` comment blocks), one row of 1D pre-spline values, then the
//! 3D cube rows as integer triples.
//!
//! # Format
//!
//! ```text
//! # Dimensions 17x17x17
//! # Input bit depth 10
//! # Output bit depth 10
//! 0 64 128 ... 1023
//! 0 0 0
//! 0 0 64
//! ...
//! ```
//!
//! Directive patterns are scanned on every line, comments included, because
//! real exports keep `Dimensions`/`bit depth` headers in comment blocks.
//! The first line that survives stripping is the 1D pre-spline row, unless
//! the file turns out to be a pure cube (see [`parse`]).

use crate::document::{Directive, LineClass, LutDocument, LutKind, ParseWarning, parse_row, parse_token};
use crate::error::{LutResult, ParseError};
use std::fs;
use std::path::Path;

/// Reads and parses a 3DL document from a file.
pub fn read_3dl<P: AsRef<Path>>(path: P) -> LutResult<LutDocument> {
    let source = fs::read_to_string(path.as_ref())?;
    parse(&source)
}

/// Parses a 3DL document from source text.
///
/// The first surviving line is taken as the 1D pre-spline row UNLESS it has
/// exactly three tokens and the declared dimension product equals the
/// surviving line count; such a file is a pure cube with no spline at all.
/// Legacy inputs, whose spline row has one value per grid step, are
/// unaffected by that exception.
pub fn parse(source: &str) -> LutResult<LutDocument> {
    let mut doc = LutDocument::new(LutKind::ThreeDl);
    let mut kept: Vec<(usize, &str)> = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        match classify(raw) {
            LineClass::Directive(d) => apply(&mut doc, d),
            LineClass::Blank | LineClass::Comment => {}
            LineClass::Sample => kept.push((idx + 1, raw.trim())),
        }
    }

    if kept.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let (first_line, first_text) = kept[0];
    let first_tokens = first_text.split_whitespace().count();
    let product = doc.declared_product();
    let has_spline = !(first_tokens == 3 && product != 0 && kept.len() == product);

    let rows = if has_spline {
        for tok in first_text.split_whitespace() {
            match parse_token(tok) {
                Some(v) => doc.spline.push(v),
                None => {
                    doc.warnings.push(ParseWarning {
                        line: first_line,
                        message: format!("bad spline value {tok:?}, using 0"),
                    });
                    doc.spline.push(0.0);
                }
            }
        }
        // An undeclared grid takes its size from the spline length.
        if doc.spline.len() != doc.declared_size[0] {
            if doc.declared_size[0] != 0 {
                doc.warnings.push(ParseWarning {
                    line: first_line,
                    message: format!(
                        "spline has {} values but declared size is {}",
                        doc.spline.len(),
                        doc.declared_size[0]
                    ),
                });
            } else {
                let n = doc.spline.len();
                doc.declared_size = [n, n, n];
            }
        }
        &kept[1..]
    } else {
        &kept[..]
    };

    for &(line, text) in rows {
        match parse_row(text) {
            Some(rgb) => doc.rows.push(rgb),
            None => {
                doc.warnings.push(ParseWarning {
                    line,
                    message: format!("malformed sample row {text:?}, using 0 0 0"),
                });
                doc.rows.push([0.0; 3]);
            }
        }
    }

    Ok(doc)
}

/// Classifies one raw source line.
///
/// Directives are matched before the comment check so headers living inside
/// comment blocks still contribute their values.
fn classify(raw: &str) -> LineClass {
    if let Some(d) = scan_directive(raw) {
        return LineClass::Directive(d);
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        LineClass::Blank
    } else if trimmed.starts_with('#') {
        LineClass::Comment
    } else {
        LineClass::Sample
    }
}

/// Scans a line for the 3DL directive patterns.
fn scan_directive(line: &str) -> Option<Directive> {
    for key in ["Dimensions", "Sample"] {
        if let Some(rest) = after(line, key) {
            if let Some(dims) = parse_dims(rest) {
                return Some(Directive::Dimensions(dims));
            }
        }
    }
    if let Some(n) = after(line, "Input bit depth").and_then(first_uint) {
        return Some(Directive::InputDepth(n as u32));
    }
    if let Some(n) = after(line, "Output bit depth").and_then(first_uint) {
        return Some(Directive::OutputDepth(n as u32));
    }
    None
}

fn apply(doc: &mut LutDocument, d: Directive) {
    match d {
        Directive::Dimensions(dims) => doc.declared_size = dims,
        Directive::InputDepth(n) => doc.input_depth = n,
        Directive::OutputDepth(n) => doc.output_depth = n,
        // Cube-only directives never come out of scan_directive
        _ => {}
    }
}

/// Returns the text following `key` in `line`, if present.
fn after<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.find(key).map(|i| line[i + key.len()..].trim_start())
}

/// Parses a leading `WxHxD` token.
fn parse_dims(rest: &str) -> Option<[usize; 3]> {
    let tok = rest.split_whitespace().next()?;
    let mut parts = tok.split('x');
    let w = parts.next()?.parse().ok()?;
    let h = parts.next()?.parse().ok()?;
    let d = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some([w, h, d])
}

/// Parses a leading unsigned integer token.
fn first_uint(rest: &str) -> Option<usize> {
    rest.split_whitespace().next()?.parse().ok()
}
