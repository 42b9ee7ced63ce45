//! Tartan twill weave rendering core.
//!
//! Two components run in sequence: the pattern compiler turns per-axis
//! thread descriptions (`<paletteIndex>:<thickness>` lines) plus an ordered
//! color palette into a [`WeavePattern`], and the twill rasterizer fills a
//! pixel canvas, overlaying a 45° interference texture at every
//! color-differing thread crossing. [`WeaveStudio`] carries the editing
//! state a GUI shell drives: palette list, linked column/row text fields,
//! and the retained last-good canvas.
//!
//! Color lookups are validated at compile time: an unresolvable palette
//! index or color spec fails compilation with a named-axis message instead
//! of degrading into an undefined fill at render time.

mod color;
mod pattern;
mod raster;
mod studio;

pub use color::{normalize_spec, Color};
pub use pattern::{compile_pattern, AxisPattern, PatternSegment, WeavePattern};
pub use raster::{axis_extent, encode_png, rasterize};
pub use studio::{WeaveStudio, DEFAULT_COLORS, DEFAULT_PATTERN, DEFAULT_TWILL_WIDTH};
