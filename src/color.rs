use image::Rgba;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

/// Normalize a user-entered color spec: lowercase, all whitespace stripped.
pub fn normalize_spec(raw: &str) -> String {
    whitespace().replace_all(&raw.to_lowercase(), "").into_owned()
}

/// A normalized color spec together with its resolved sRGB value.
///
/// Equality covers the whole value, so specs that normalize to different
/// strings ("red" vs "#ff0000") stay distinct colors even when they resolve
/// to the same RGB. Thread crossings compare colors by this identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub spec: String,
    pub rgb: [u8; 3],
}

impl Color {
    /// Resolve a color spec. Accepts `#rrggbb`, `#rgb`, bare 6/3-digit hex,
    /// and CSS named colors. Returns `None` for anything unresolvable.
    pub fn parse(raw: &str) -> Option<Self> {
        let spec = normalize_spec(raw);
        if spec.is_empty() {
            return None;
        }
        let rgb = resolve_rgb(&spec)?;
        Some(Self { spec, rgb })
    }

    pub fn rgba(&self) -> Rgba<u8> {
        Rgba([self.rgb[0], self.rgb[1], self.rgb[2], 255])
    }
}

fn resolve_rgb(spec: &str) -> Option<[u8; 3]> {
    let hex = spec.strip_prefix('#').unwrap_or(spec);
    if hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return hex_to_rgb(hex);
    }
    if hex.len() == 3 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
        return hex_to_rgb(&expanded);
    }
    palette::named::from_str(spec).map(|c| [c.red, c.green, c.blue])
}

fn hex_to_rgb(hex: &str) -> Option<[u8; 3]> {
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}
