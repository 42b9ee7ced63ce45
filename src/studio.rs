//! Studio state: the editing session a GUI shell drives.
//!
//! Field wiring is explicit rather than reactive. Editing the columns text
//! mirrors it into the rows text while the link flag is set, and every input
//! change funnels through the single [`WeaveStudio::regenerate`] entry
//! point. A failed regeneration keeps the previous canvas untouched and
//! retains the validation message for the shell to surface.

use crate::color::normalize_spec;
use crate::pattern::compile_pattern;
use crate::raster::{encode_png, rasterize};
use image::RgbaImage;
use std::time::Instant;

/// Starting palette: navy, red, and bottle-green tartan threads.
pub const DEFAULT_COLORS: [&str; 3] = ["#23295e", "#d71320", "#1b3519"];

pub const DEFAULT_TWILL_WIDTH: f32 = 20.0;

/// Default thread sequence, applied to both axes.
pub const DEFAULT_PATTERN: &str = "0:120
1:108
2:48
1:108
2:300
1:108
2:48
1:108
2:300
1:108
2:48
1:108";

/// Editing session behind the shell: palette, per-axis pattern texts, twill
/// width, the column/row link flag, and the last successfully rendered
/// canvas.
pub struct WeaveStudio {
    colors: Vec<String>,
    columns_text: String,
    rows_text: String,
    twill_width: f32,
    link_rows_to_columns: bool,
    canvas: Option<RgbaImage>,
    last_error: Option<String>,
}

impl Default for WeaveStudio {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            columns_text: DEFAULT_PATTERN.to_string(),
            rows_text: DEFAULT_PATTERN.to_string(),
            twill_width: DEFAULT_TWILL_WIDTH,
            link_rows_to_columns: true,
            canvas: None,
            last_error: None,
        }
    }
}

impl WeaveStudio {
    /// Append a color to the palette. Empty specs and entries already
    /// present after normalization are silently ignored.
    pub fn add_color(&mut self, raw: &str) {
        let normalized = normalize_spec(raw);
        if normalized.is_empty() || self.colors.contains(&normalized) {
            return;
        }
        self.colors.push(normalized);
    }

    /// Drop every palette entry matching the given spec.
    pub fn remove_color(&mut self, spec: &str) {
        self.colors.retain(|c| c != spec);
    }

    /// Update the columns text; while linked, the rows text follows it.
    pub fn set_columns_text(&mut self, text: &str) -> Result<(), String> {
        self.columns_text = text.to_string();
        if self.link_rows_to_columns {
            self.rows_text = text.to_string();
        }
        self.regenerate()
    }

    pub fn set_rows_text(&mut self, text: &str) -> Result<(), String> {
        self.rows_text = text.to_string();
        self.regenerate()
    }

    pub fn set_twill_width(&mut self, twill_width: f32) -> Result<(), String> {
        self.twill_width = twill_width;
        self.regenerate()
    }

    /// Toggle the column/row link. Enabling it mirrors the current columns
    /// text into the rows field immediately.
    pub fn set_link_rows_to_columns(&mut self, linked: bool) -> Result<(), String> {
        self.link_rows_to_columns = linked;
        if linked {
            self.rows_text = self.columns_text.clone();
        }
        self.regenerate()
    }

    /// Recompile and re-render the current state.
    ///
    /// On success the retained canvas is replaced and any previous error is
    /// cleared. On failure the previous canvas stays as-is and the message
    /// is kept for [`WeaveStudio::last_error`].
    pub fn regenerate(&mut self) -> Result<(), String> {
        let started = Instant::now();
        let pattern = match compile_pattern(
            &self.colors,
            self.twill_width,
            &self.columns_text,
            &self.rows_text,
        ) {
            Ok(pattern) => pattern,
            Err(message) => {
                log::warn!("Weave regeneration rejected: {}", message);
                self.last_error = Some(message.clone());
                return Err(message);
            }
        };

        let canvas = rasterize(&pattern);
        log::info!(
            "Weave regenerated: {}x{}, {} columns, {} rows, {}ms",
            canvas.width(),
            canvas.height(),
            pattern.horizontal.len(),
            pattern.vertical.len(),
            started.elapsed().as_millis()
        );
        self.canvas = Some(canvas);
        self.last_error = None;
        Ok(())
    }

    /// Encode the retained canvas as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, String> {
        let canvas = self
            .canvas
            .as_ref()
            .ok_or_else(|| "Nothing rendered yet.".to_string())?;
        encode_png(canvas)
    }

    pub fn canvas(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn columns_text(&self) -> &str {
        &self.columns_text
    }

    pub fn rows_text(&self) -> &str {
        &self.rows_text
    }

    pub fn twill_width(&self) -> f32 {
        self.twill_width
    }

    pub fn is_linked(&self) -> bool {
        self.link_rows_to_columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_renders_the_stock_tartan() {
        let mut studio = WeaveStudio::default();
        assert!(studio.canvas().is_none());
        studio.regenerate().unwrap();

        let extent: u32 = DEFAULT_PATTERN
            .lines()
            .map(|line| line.split_once(':').unwrap().1.parse::<u32>().unwrap())
            .sum();
        let canvas = studio.canvas().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (extent, extent));
    }

    #[test]
    fn add_color_normalizes_and_dedupes() {
        let mut studio = WeaveStudio::default();
        let before = studio.colors().len();

        studio.add_color(" RED ");
        assert_eq!(studio.colors().last().unwrap(), "red");

        studio.add_color("red");
        studio.add_color("");
        studio.add_color("   ");
        assert_eq!(studio.colors().len(), before + 1);
    }

    #[test]
    fn remove_color_drops_matching_entries() {
        let mut studio = WeaveStudio::default();
        studio.add_color("red");
        studio.remove_color("red");
        assert!(!studio.colors().contains(&"red".to_string()));
    }

    #[test]
    fn linked_columns_mirror_into_rows() {
        let mut studio = WeaveStudio::default();
        assert!(studio.is_linked());
        studio.set_columns_text("0:2\n1:2").unwrap();
        assert_eq!(studio.rows_text(), "0:2\n1:2");

        let canvas = studio.canvas().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (4, 4));
    }

    #[test]
    fn unlinked_rows_keep_their_own_text() {
        let mut studio = WeaveStudio::default();
        studio.set_link_rows_to_columns(false).unwrap();
        studio.set_columns_text("0:2").unwrap();
        assert_eq!(studio.rows_text(), DEFAULT_PATTERN);
    }

    #[test]
    fn relinking_mirrors_columns_immediately() {
        let mut studio = WeaveStudio::default();
        studio.set_link_rows_to_columns(false).unwrap();
        studio.set_columns_text("0:3").unwrap();
        studio.set_link_rows_to_columns(true).unwrap();
        assert_eq!(studio.rows_text(), "0:3");
    }

    #[test]
    fn failed_regeneration_keeps_the_previous_canvas() {
        let mut studio = WeaveStudio::default();
        studio.set_columns_text("0:2\n1:2").unwrap();

        let err = studio.set_columns_text("0:0").unwrap_err();
        assert_eq!(err, "invalid horizontal pattern - invalid thickness");
        assert_eq!(studio.last_error(), Some(err.as_str()));

        // Previous 4x4 render survives the failure.
        let canvas = studio.canvas().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (4, 4));

        studio.set_columns_text("0:2\n1:2").unwrap();
        assert!(studio.last_error().is_none());
    }

    #[test]
    fn export_png_requires_a_render() {
        let mut studio = WeaveStudio::default();
        assert!(studio.export_png().is_err());

        studio.set_columns_text("0:2").unwrap();
        let bytes = studio.export_png().unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}
