//! SVG snapshot export.
//!
//! Each layer becomes a `<g>` group and each path a `<path>` element. Closed
//! paths end with `Z` instead of repeating their first point.

use std::fmt;
use std::path::Path as FsPath;

use linework_core::{CanvasSettings, Layer, LineworkError, Path};

/// Stroke applied to every path.
const STROKE_WIDTH: f64 = 1.0;

/// Renders layers as a standalone SVG document sized to the canvas.
pub fn to_svg(layers: &[Layer], canvas: &CanvasSettings) -> String {
    let mut out = String::new();
    // writing into a String never fails
    if render_svg(&mut out, layers, canvas).is_err() {
        out.clear();
    }
    out
}

/// Streams the SVG document into `out`, stopping at the first write error.
pub fn render_svg<W: fmt::Write>(out: &mut W, layers: &[Layer], canvas: &CanvasSettings) -> fmt::Result {
    let w = fmt_num(canvas.width);
    let h = fmt_num(canvas.height);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    for (index, layer) in layers.iter().enumerate() {
        writeln!(
            out,
            r#"  <g id="layer-{index}" class="{}" fill="none" stroke="black" stroke-width="{}">"#,
            escape(&layer.id),
            fmt_num(STROKE_WIDTH),
        )?;
        for path in layer.paths.iter().filter(|p| !p.is_degenerate()) {
            out.write_str(r#"    <path d=""#)?;
            write_path_data(out, path)?;
            out.write_str("\"/>\n")?;
        }
        out.write_str("  </g>\n")?;
    }
    out.write_str("</svg>\n")
}

/// Writes [`to_svg`] output to `path`.
///
/// Returns `LineworkError::Io` on write failure.
pub fn write_svg(layers: &[Layer], canvas: &CanvasSettings, path: &FsPath) -> Result<(), LineworkError> {
    std::fs::write(path, to_svg(layers, canvas)).map_err(|e| LineworkError::Io(e.to_string()))
}

/// The `d` attribute for a path with at least two points.
fn write_path_data<W: fmt::Write>(out: &mut W, path: &Path) -> fmt::Result {
    let points = if path.closed { path.ring() } else { &path.points[..] };
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        let cmd = if i == 0 { 'M' } else { 'L' };
        write!(out, "{cmd}{} {}", fmt_num(p.x), fmt_num(p.y))?;
    }
    if path.closed {
        out.write_str(" Z")?;
    }
    Ok(())
}

/// Three decimals with trailing zeros trimmed.
fn fmt_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
