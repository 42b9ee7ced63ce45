//! Pattern compiler: per-axis thread descriptions plus a color palette into
//! a validated [`WeavePattern`].
//!
//! Each axis text lists one segment per line as `<paletteIndex>:<thickness>`.
//! Color lookups are validated here: an unresolvable palette index or color
//! spec fails compilation instead of degrading into an undefined fill later.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// One contiguous run of same-colored threads along an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSegment {
    pub color: Color,
    pub thickness: u32,
}

/// Ordered thread segments for one axis (columns or rows).
pub type AxisPattern = Vec<PatternSegment>;

/// A compiled weave: `horizontal` drives the column-axis coloring,
/// `vertical` the row-axis coloring, `twill_width` the pixel period of the
/// diagonal interference texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeavePattern {
    pub twill_width: f32,
    pub horizontal: AxisPattern,
    pub vertical: AxisPattern,
}

/// Compile both axis texts against an ordered palette of color specs.
///
/// Validation order: twill width, then the horizontal axis, then the
/// vertical axis. The first failure wins, so horizontal errors are
/// reported even when the vertical text is also invalid.
pub fn compile_pattern(
    palette: &[String],
    twill_width: f32,
    horizontal_text: &str,
    vertical_text: &str,
) -> Result<WeavePattern, String> {
    if !twill_width.is_finite() || twill_width <= 0.0 {
        return Err("invalid twill width".to_string());
    }

    Ok(WeavePattern {
        twill_width,
        horizontal: compile_axis(palette, "horizontal", horizontal_text)?,
        vertical: compile_axis(palette, "vertical", vertical_text)?,
    })
}

fn compile_axis(palette: &[String], axis: &str, text: &str) -> Result<AxisPattern, String> {
    let lines: Vec<&str> = text.split('\n').map(str::trim).collect();

    // Thickness failures outrank color failures within an axis.
    let thicknesses = lines
        .iter()
        .map(|line| parse_thickness(line))
        .collect::<Option<Vec<u32>>>()
        .ok_or_else(|| format!("invalid {} pattern - invalid thickness", axis))?;

    lines
        .iter()
        .zip(thicknesses)
        .map(|(line, thickness)| {
            let color = resolve_line_color(palette, axis, line)?;
            Ok(PatternSegment { color, thickness })
        })
        .collect()
}

/// Thickness is everything after the first `:`, parsed as a positive
/// integer. A line without `:` has no thickness field and is rejected.
fn parse_thickness(line: &str) -> Option<u32> {
    let (_, field) = line.split_once(':')?;
    field.trim().parse::<u32>().ok().filter(|t| *t >= 1)
}

fn resolve_line_color(palette: &[String], axis: &str, line: &str) -> Result<Color, String> {
    let field = line.split_once(':').map(|(c, _)| c).unwrap_or(line).trim();
    let spec = field
        .parse::<usize>()
        .ok()
        .and_then(|index| palette.get(index))
        .ok_or_else(|| format!("invalid {} pattern - invalid color index", axis))?;
    Color::parse(spec)
        .ok_or_else(|| format!("invalid {} pattern - unknown color \"{}\"", axis, spec))
}
