//! CTL program assembly.
//!
//! Turns normalized grids into a CTL source text: header comments, the
//! constant array literals, and a fixed-signature `main` wired to the
//! arrays that are actually present.

use crate::error::EmitError;
use lut2ctl_lut::{CubeGrid, Spline1D, SplineGrid};
use std::fmt::Write;

/// Axis iteration order for cube emission.
///
/// The two source dialects walk the grid differently when printing: 3DL
/// emits in population order, while CUBE prints the transpose of the order
/// it was populated in. Downstream shaders expect the layout their dialect
/// has always produced, so both walks are kept distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// x outermost, z innermost — the 3DL walk, matching population order.
    XOuter,
    /// z outermost, x innermost — the CUBE walk, transposed from
    /// population order.
    ZOuter,
}

/// Per-conversion emission metadata.
#[derive(Debug, Clone)]
pub struct EmissionMeta {
    /// Source file name for the header comment.
    pub source_name: String,
    /// Optional display title (CUBE `TITLE`).
    pub title: Option<String>,
    /// Cube axis iteration order.
    pub order: AxisOrder,
}

/// The fixed CTL entry-point signature shared by every emitted program.
const MAIN_SIGNATURE: &str = "\
void main( varying float rIn,
           varying float gIn,
           varying float bIn,
           varying float aIn,
           output varying float rOut,
           output varying float gOut,
           output varying float bOut,
           output varying float aOut )";

/// Emits a CTL program for the given grids.
///
/// At least one grid must be present. The emitter performs no file I/O;
/// writing the returned text to disk is the caller's business.
pub fn emit(
    spline: Option<&SplineGrid>,
    cube: Option<&CubeGrid>,
    meta: &EmissionMeta,
) -> Result<String, EmitError> {
    let (domain_min, domain_max) = match (spline, cube) {
        (_, Some(c)) => (c.domain_min, c.domain_max),
        (Some(s), None) => (s.domain_min, s.domain_max),
        (None, None) => return Err(EmitError::NothingToEmit),
    };

    let mut out = String::new();
    if let Some(title) = &meta.title {
        writeln!(out, "// {title}").unwrap();
    }
    writeln!(out, "// CTL 3d Lut from {}", meta.source_name).unwrap();
    writeln!(
        out,
        "// Min: {:.6}, {:.6}, {:.6}",
        domain_min[0], domain_min[1], domain_min[2]
    )
    .unwrap();
    writeln!(
        out,
        "// Max: {:.6}, {:.6}, {:.6}",
        domain_max[0], domain_max[1], domain_max[2]
    )
    .unwrap();
    if let Some(c) = cube {
        writeln!(out, "// Lut3D size {}x{}x{}", c.size[0], c.size[1], c.size[2]).unwrap();
    } else if let Some(s) = spline {
        writeln!(out, "// Lut1D size {}", s.values.len()).unwrap();
    }
    writeln!(out).unwrap();

    if let Some(s) = spline {
        write_spline(&mut out, s);
    }
    if let Some(c) = cube {
        write_cube(&mut out, c, meta.order);
    }
    write_main(&mut out, spline, cube);

    Ok(out)
}

/// Array names referenced by the `main` body for a given spline shape.
fn spline_names(s: &SplineGrid) -> (&'static str, &'static str, &'static str) {
    match s.values {
        Spline1D::Shared(_) => ("spline", "spline", "spline"),
        Spline1D::Rgb { .. } => ("splineR", "splineG", "splineB"),
    }
}

fn write_spline(out: &mut String, s: &SplineGrid) {
    match &s.values {
        Spline1D::Shared(v) => {
            writeln!(out, "const float spline[{}] = {{ {} }};", v.len(), join(v)).unwrap();
            writeln!(out).unwrap();
        }
        Spline1D::Rgb { r, g, b } => {
            for (name, ch) in [("splineR", r), ("splineG", g), ("splineB", b)] {
                writeln!(out, "const float {name}[{}] = {{ {} }};", ch.len(), join(ch)).unwrap();
                writeln!(out).unwrap();
            }
        }
    }
}

fn write_cube(out: &mut String, cube: &CubeGrid, order: AxisOrder) {
    let [sx, sy, sz] = cube.size;
    writeln!(
        out,
        "const float min3d[3] = {{ {:.6}, {:.6}, {:.6} }};",
        cube.domain_min[0], cube.domain_min[1], cube.domain_min[2]
    )
    .unwrap();
    writeln!(
        out,
        "const float max3d[3] = {{ {:.6}, {:.6}, {:.6} }};",
        cube.domain_max[0], cube.domain_max[1], cube.domain_max[2]
    )
    .unwrap();
    writeln!(out, "const float cube[{sx}][{sy}][{sz}][3] =").unwrap();

    // The declared shape stays [x][y][z][3]; only the walk differs.
    let (n0, n1, n2) = match order {
        AxisOrder::XOuter => (sx, sy, sz),
        AxisOrder::ZOuter => (sz, sy, sx),
    };
    let mut outer = Vec::with_capacity(n0);
    for i0 in 0..n0 {
        let mut mid = Vec::with_capacity(n1);
        for i1 in 0..n1 {
            let mut inner = Vec::with_capacity(n2);
            for i2 in 0..n2 {
                let (x, y, z) = match order {
                    AxisOrder::XOuter => (i0, i1, i2),
                    AxisOrder::ZOuter => (i2, i1, i0),
                };
                let v = cube.get(x, y, z);
                inner.push(format!("{{ {:.7}, {:.7}, {:.7} }}", v[0], v[1], v[2]));
            }
            mid.push(format!("{{ {} }}", inner.join(",\n")));
        }
        outer.push(format!("{{ {} }}", mid.join(",\n")));
    }
    writeln!(out, "{{ {} }};", outer.join(",\n")).unwrap();
    writeln!(out).unwrap();
}

fn write_main(out: &mut String, spline: Option<&SplineGrid>, cube: Option<&CubeGrid>) {
    writeln!(out, "{MAIN_SIGNATURE}").unwrap();
    writeln!(out, "{{").unwrap();
    match (spline, cube) {
        (Some(s), Some(_)) => {
            let (nr, ng, nb) = spline_names(s);
            writeln!(out, "  float rgb[3];").unwrap();
            writeln!(out, "  rgb[0] = lookup1D( {nr}, 0.0, 1.0, rIn );").unwrap();
            writeln!(out, "  rgb[1] = lookup1D( {ng}, 0.0, 1.0, gIn );").unwrap();
            writeln!(out, "  rgb[2] = lookup1D( {nb}, 0.0, 1.0, bIn );").unwrap();
            writeln!(
                out,
                "  lookup3D_f( cube, min3d, max3d, rgb[0], rgb[1], rgb[2], rOut, gOut, bOut );"
            )
            .unwrap();
        }
        (None, Some(_)) => {
            writeln!(
                out,
                "  lookup3D_f( cube, min3d, max3d, rIn, gIn, bIn, rOut, gOut, bOut );"
            )
            .unwrap();
        }
        (Some(s), None) => {
            let (nr, ng, nb) = spline_names(s);
            for (channel, name, i) in [("r", nr, 0), ("g", ng, 1), ("b", nb, 2)] {
                writeln!(
                    out,
                    "  {channel}Out = lookup1D( {name}, {}, {}, {channel}In );",
                    s.domain_min[i], s.domain_max[i]
                )
                .unwrap();
            }
        }
        // emit() rejected this combination already
        (None, None) => {}
    }
    writeln!(out, "  aOut = aIn;").unwrap();
    writeln!(out, "}}").unwrap();
}

fn join(v: &[f64]) -> String {
    v.iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(order: AxisOrder) -> EmissionMeta {
        EmissionMeta {
            source_name: "test.lut".into(),
            title: None,
            order,
        }
    }

    /// Cube whose cell (x, y, z) holds the value x*4 + y*2 + z in every
    /// channel, so the emitted sequence exposes the walk order.
    fn indexed_cube() -> CubeGrid {
        let mut values = Vec::new();
        for x in 0..2 {
            for y in 0..2 {
                for z in 0..2 {
                    let v = (x * 4 + y * 2 + z) as f64;
                    values.push([v, v, v]);
                }
            }
        }
        CubeGrid {
            size: [2, 2, 2],
            values,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            scale_divisor: 1.0,
        }
    }

    fn cube_literal(text: &str) -> &str {
        let start = text.find("const float cube").expect("no cube literal");
        let end = text[start..].find("};").expect("unterminated literal");
        &text[start..start + end]
    }

    fn first_channel_sequence(text: &str) -> Vec<f64> {
        cube_literal(text)
            .lines()
            .skip(1)
            .flat_map(|l| {
                l.split(['{', '}', ','])
                    .filter_map(|t| t.trim().parse::<f64>().ok())
                    .next()
            })
            .collect()
    }

    #[test]
    fn cube_only_main_has_one_3d_lookup() {
        let cube = indexed_cube();
        let text = emit(None, Some(&cube), &meta(AxisOrder::ZOuter)).expect("emit failed");
        assert_eq!(text.matches("lookup3D_f(").count(), 1);
        assert_eq!(text.matches("lookup1D(").count(), 0);
        assert!(text.contains("aOut = aIn;"));
    }

    #[test]
    fn spline_and_cube_chain_lookups() {
        let spline = SplineGrid {
            values: Spline1D::Shared(vec![0.0, 0.5, 1.0]),
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            scale_divisor: 1023.0,
        };
        let cube = indexed_cube();
        let text =
            emit(Some(&spline), Some(&cube), &meta(AxisOrder::XOuter)).expect("emit failed");
        assert_eq!(text.matches("lookup1D(").count(), 3);
        assert_eq!(text.matches("lookup3D_f(").count(), 1);
        assert!(text.contains("const float spline[3] = { 0, 0.5, 1 };"));
        assert!(text.contains("float rgb[3];"));
    }

    #[test]
    fn rgb_spline_emits_three_arrays() {
        let spline = SplineGrid {
            values: Spline1D::Rgb {
                r: vec![0.0, 1.0],
                g: vec![0.1, 0.9],
                b: vec![0.2, 0.8],
            },
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            scale_divisor: 1.0,
        };
        let text = emit(Some(&spline), None, &meta(AxisOrder::ZOuter)).expect("emit failed");
        assert!(text.contains("const float splineR[2]"));
        assert!(text.contains("const float splineG[2]"));
        assert!(text.contains("const float splineB[2]"));
        assert_eq!(text.matches("lookup1D(").count(), 3);
        assert_eq!(text.matches("lookup3D_f(").count(), 0);
        assert!(text.contains("// Lut1D size 2"));
    }

    #[test]
    fn x_outer_walk_follows_population_order() {
        let cube = indexed_cube();
        let text = emit(None, Some(&cube), &meta(AxisOrder::XOuter)).expect("emit failed");
        let seq = first_channel_sequence(&text);
        assert_eq!(seq, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn z_outer_walk_transposes_population_order() {
        let cube = indexed_cube();
        let text = emit(None, Some(&cube), &meta(AxisOrder::ZOuter)).expect("emit failed");
        let seq = first_channel_sequence(&text);
        assert_eq!(seq, vec![0.0, 4.0, 2.0, 6.0, 1.0, 5.0, 3.0, 7.0]);
    }

    #[test]
    fn cube_literal_comma_placement() {
        let cube = indexed_cube();
        let text = emit(None, Some(&cube), &meta(AxisOrder::ZOuter)).expect("emit failed");
        let literal = cube_literal(&text);
        // 8 triples x 2 commas, 4 inner separators, 2 mid, 1 outer.
        assert_eq!(literal.matches(',').count(), 23);
        assert!(!literal.contains(", }"));
        assert!(!literal.contains(",\n}"));
    }

    #[test]
    fn header_uses_six_decimal_places() {
        let mut cube = indexed_cube();
        cube.domain_max = [0.5, 1.0, 2.0];
        let text = emit(None, Some(&cube), &meta(AxisOrder::ZOuter)).expect("emit failed");
        assert!(text.contains("// Min: 0.000000, 0.000000, 0.000000"));
        assert!(text.contains("// Max: 0.500000, 1.000000, 2.000000"));
        assert!(text.contains("// Lut3D size 2x2x2"));
    }

    #[test]
    fn title_leads_the_header() {
        let cube = indexed_cube();
        let mut m = meta(AxisOrder::ZOuter);
        m.title = Some("Test Grade".into());
        let text = emit(None, Some(&cube), &m).expect("emit failed");
        assert!(text.starts_with("// Test Grade\n// CTL 3d Lut from test.lut\n"));
    }

    #[test]
    fn nothing_to_emit_is_an_error() {
        assert!(matches!(
            emit(None, None, &meta(AxisOrder::XOuter)),
            Err(EmitError::NothingToEmit)
        ));
    }
}
