//! Adobe/Resolve .cube LUT format support.
//!
//! The .cube format is a simple text-based LUT format widely supported by
//! DaVinci Resolve, Adobe applications, and many other tools.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! `LUT_1D_SIZE` marks a 1D table and is authoritative over any
//! `LUT_3D_SIZE` also present. When no size directive appears at all the
//! declared size defaults to 32.

use crate::document::{Directive, LineClass, LutDocument, LutKind, ParseWarning, parse_row};
use crate::error::{LutResult, ParseError};
use std::fs;
use std::path::Path;

/// Default cube edge length when no size directive is present.
const DEFAULT_SIZE: usize = 32;

/// Reads and parses a CUBE document from a file.
pub fn read_cube<P: AsRef<Path>>(path: P) -> LutResult<LutDocument> {
    let source = fs::read_to_string(path.as_ref())?;
    parse(&source)
}

/// Parses a CUBE document from source text.
pub fn parse(source: &str) -> LutResult<LutDocument> {
    let mut doc = LutDocument::new(LutKind::Cube);
    let mut size_1d: Option<usize> = None;
    let mut size_3d: Option<usize> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        match classify(raw, line)? {
            LineClass::Blank | LineClass::Comment => {}
            LineClass::Directive(d) => match d {
                Directive::Title(t) => doc.title = Some(t),
                Directive::DomainMin(v) => {
                    doc.domain_min = v;
                    doc.domain_declared = true;
                }
                Directive::DomainMax(v) => {
                    doc.domain_max = v;
                    doc.domain_declared = true;
                }
                Directive::Size1D(n) => size_1d = Some(n),
                Directive::Size3D(n) => size_3d = Some(n),
                Directive::CubeToken => {}
                // 3DL-only directives never come out of classify
                _ => {}
            },
            LineClass::Sample => match parse_row(raw.trim()) {
                Some(rgb) => doc.rows.push(rgb),
                None => {
                    doc.warnings.push(ParseWarning {
                        line,
                        message: format!("malformed sample row {:?}, using 0 0 0", raw.trim()),
                    });
                    doc.rows.push([0.0; 3]);
                }
            },
        }
    }

    if doc.rows.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    // LUT_1D_SIZE wins over LUT_3D_SIZE when both are present.
    doc.is_1d = size_1d.is_some();
    let n = size_1d.or(size_3d).unwrap_or(DEFAULT_SIZE);
    doc.declared_size = if doc.is_1d { [n, 1, 1] } else { [n, n, n] };

    Ok(doc)
}

/// Classifies one trimmed source line.
fn classify(raw: &str, line: usize) -> Result<LineClass, ParseError> {
    let t = raw.trim();
    if t.is_empty() {
        return Ok(LineClass::Blank);
    }
    if t.starts_with('#') {
        return Ok(LineClass::Comment);
    }
    let keyword = t.split_whitespace().next().unwrap_or("");
    let directive = match keyword {
        "TITLE" => Some(Directive::Title(parse_title(t, line)?)),
        "DOMAIN_MIN" => Some(Directive::DomainMin(parse_domain(t, line)?)),
        "DOMAIN_MAX" => Some(Directive::DomainMax(parse_domain(t, line)?)),
        "LUT_1D_SIZE" => Some(Directive::Size1D(parse_size(t, line)?)),
        "LUT_3D_SIZE" => Some(Directive::Size3D(parse_size(t, line)?)),
        "CUBE" => Some(Directive::CubeToken),
        _ => None,
    };
    Ok(match directive {
        Some(d) => LineClass::Directive(d),
        None => LineClass::Sample,
    })
}

fn parse_title(line: &str, lineno: usize) -> Result<String, ParseError> {
    let bad = || ParseError::BadDirective {
        line: lineno,
        text: line.to_string(),
    };
    let open = line.find('"').ok_or_else(bad)?;
    let close = line.rfind('"').ok_or_else(bad)?;
    if close <= open {
        return Err(bad());
    }
    Ok(line[open + 1..close].to_string())
}

fn parse_domain(line: &str, lineno: usize) -> Result<[f64; 3], ParseError> {
    let bad = || ParseError::BadDirective {
        line: lineno,
        text: line.to_string(),
    };
    let mut parts = line.split_whitespace();
    parts.next(); // keyword
    let mut out = [0.0_f64; 3];
    for v in &mut out {
        *v = parts
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(bad)?;
    }
    Ok(out)
}

fn parse_size(line: &str, lineno: usize) -> Result<usize, ParseError> {
    let mut parts = line.split_whitespace();
    parts.next(); // keyword
    parts
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| ParseError::BadDirective {
            line: lineno,
            text: line.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_3d_cube() {
        let src = r#"
# Test LUT
TITLE "Test Grade"
LUT_3D_SIZE 2
DOMAIN_MIN 0.0 0.0 0.0
DOMAIN_MAX 1.0 1.0 1.0

0.0 0.0 0.0
1.0 0.0 0.0
0.0 1.0 0.0
1.0 1.0 0.0
0.0 0.0 1.0
1.0 0.0 1.0
0.0 1.0 1.0
1.0 1.0 1.0
"#;
        let doc = parse(src).expect("parse failed");
        assert_eq!(doc.title.as_deref(), Some("Test Grade"));
        assert!(!doc.is_1d);
        assert_eq!(doc.declared_size, [2, 2, 2]);
        assert_eq!(doc.rows.len(), 8);
        assert!(doc.domain_declared);
    }

    #[test]
    fn lut_1d_size_is_authoritative() {
        let src = "\
LUT_3D_SIZE 33
LUT_1D_SIZE 3
0.0 0.0 0.0
0.5 0.4 0.3
1.0 1.0 1.0
";
        let doc = parse(src).expect("parse failed");
        assert!(doc.is_1d);
        assert_eq!(doc.declared_size, [3, 1, 1]);
    }

    #[test]
    fn size_defaults_to_32() {
        let src = "0.0 0.0 0.0\n1.0 1.0 1.0\n";
        let doc = parse(src).expect("parse failed");
        assert_eq!(doc.declared_size, [32, 32, 32]);
        assert!(!doc.domain_declared);
    }

    #[test]
    fn cube_marker_is_stripped() {
        let src = "\
CUBE
LUT_3D_SIZE 2
0.0 0.0 0.0
1.0 0.0 0.0
0.0 1.0 0.0
1.0 1.0 0.0
0.0 0.0 1.0
1.0 0.0 1.0
0.0 1.0 1.0
1.0 1.0 1.0
";
        let doc = parse(src).expect("parse failed");
        assert_eq!(doc.rows.len(), 8);
    }

    #[test]
    fn bad_size_directive_is_fatal() {
        let err = parse("LUT_3D_SIZE many\n0 0 0\n").unwrap_err();
        match err {
            ParseError::BadDirective { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_row_warns_and_holds_position() {
        let src = "\
LUT_1D_SIZE 3
0.0 0.0 0.0
oops
1.0 1.0 1.0
";
        let doc = parse(src).expect("parse failed");
        assert_eq!(doc.rows.len(), 3);
        assert_eq!(doc.rows[1], [0.0; 3]);
        assert_eq!(doc.rows[2], [1.0, 1.0, 1.0]);
        assert_eq!(doc.warnings.len(), 1);
        assert_eq!(doc.warnings[0].line, 3);
    }

    #[test]
    fn comments_only_is_empty_input() {
        assert!(matches!(
            parse("# nothing here\nTITLE \"x\"\n"),
            Err(ParseError::EmptyInput)
        ));
    }
}
