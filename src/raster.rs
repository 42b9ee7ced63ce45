//! Twill rasterizer: fills the weave canvas cell by cell, with a diagonal
//! interference overlay wherever two differently-colored threads cross.

use crate::pattern::{AxisPattern, PatternSegment, WeavePattern};
use image::RgbaImage;
use std::io::Cursor;

/// Total canvas extent along one axis.
pub fn axis_extent(axis: &AxisPattern) -> u32 {
    axis.iter().map(|segment| segment.thickness).sum()
}

/// Rasterize a compiled pattern into an RGBA canvas sized exactly
/// `(Σ horizontal thickness) × (Σ vertical thickness)`.
///
/// The canvas is tiled by cells, one per segment crossing. Each cell is
/// filled with its column color; when the row color differs, pixels on even
/// diagonal bands are recolored to it, producing 45° stripes whose period
/// scales with `twill_width`.
pub fn rasterize(pattern: &WeavePattern) -> RgbaImage {
    let mut canvas = RgbaImage::new(
        axis_extent(&pattern.horizontal),
        axis_extent(&pattern.vertical),
    );

    let mut x = 0;
    for column in &pattern.horizontal {
        let mut y = 0;
        for row in &pattern.vertical {
            fill_cell(&mut canvas, x, y, column, row, pattern.twill_width);
            y += row.thickness;
        }
        x += column.thickness;
    }
    canvas
}

/// Encode a rendered canvas as PNG bytes for the shell to display or save.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, String> {
    let mut bytes = Cursor::new(Vec::new());
    canvas
        .write_to(&mut bytes, image::ImageFormat::Png)
        .map_err(|err| format!("Failed to encode PNG: {}", err))?;
    Ok(bytes.into_inner())
}

fn fill_cell(
    canvas: &mut RgbaImage,
    x: u32,
    y: u32,
    column: &PatternSegment,
    row: &PatternSegment,
    twill_width: f32,
) {
    let (width, height) = (column.thickness, row.thickness);
    let base = column.color.rgba();
    for j in 0..height {
        for i in 0..width {
            canvas.put_pixel(x + i, y + j, base);
        }
    }

    // A crossing of two identical thread colors is indistinguishable from a
    // plain fill; skip the overlay entirely.
    if row.color == column.color {
        return;
    }

    let cross = row.color.rgba();
    for j in 0..height {
        for i in 0..width {
            if twill_band_on(i, j, width, height, twill_width) {
                canvas.put_pixel(x + i, y + j, cross);
            }
        }
    }
}

/// Diagonal band test for a cell-local pixel: the overlay is drawn where the
/// rounded phase of the 45° diagonal through `(i, j)` lands on an even band.
fn twill_band_on(i: u32, j: u32, width: u32, height: u32, twill_width: f32) -> bool {
    let phase = ((i + j) % (width + height)) as f32 / twill_width;
    (phase.round() as u64) % 2 == 0
}
