//! Cloud colour: a static picker colour or a time-driven hue cycle.

use crate::error::ColorError;
use crate::Vec3;
use serde::{Deserialize, Serialize};

/// Hue cycles per second in rainbow mode.
pub const RAINBOW_HUE_RATE: f32 = 0.1;
pub const RAINBOW_SATURATION: f32 = 0.8;
pub const RAINBOW_LIGHTNESS: f32 = 0.5;

/// How the cloud is coloured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Static,
    Rainbow,
}

/// Current colour state of the cloud.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    mode: ColorMode,
    /// Colour picker value, used in static mode.
    picker: Vec3,
}

impl Palette {
    pub fn new(color: Vec3) -> Self {
        Self { mode: ColorMode::Static, picker: color }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn picker(&self) -> Vec3 {
        self.picker
    }

    /// Pick a colour. Leaves rainbow mode.
    pub fn set_color(&mut self, color: Vec3) {
        self.mode = ColorMode::Static;
        self.picker = color;
    }

    /// Flip between static and rainbow. Returns the new mode.
    pub fn toggle_rainbow(&mut self) -> ColorMode {
        self.mode = match self.mode {
            ColorMode::Static => ColorMode::Rainbow,
            ColorMode::Rainbow => ColorMode::Static,
        };
        self.mode
    }

    /// RGB colour at `elapsed` seconds.
    pub fn color_at(&self, elapsed: f32) -> Vec3 {
        match self.mode {
            ColorMode::Static => self.picker,
            ColorMode::Rainbow => {
                let hue = (elapsed * RAINBOW_HUE_RATE).rem_euclid(1.0);
                hsl_to_rgb(hue, RAINBOW_SATURATION, RAINBOW_LIGHTNESS)
            }
        }
    }
}

/// Convert HSL (all components 0..1) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// Parse `#rrggbb` into RGB (0..1).
pub fn parse_hex_color(s: &str) -> Result<Vec3, ColorError> {
    let malformed = || ColorError::Malformed(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(malformed)?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed());
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| malformed())
    };
    Ok(Vec3::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Format RGB (0..1) as `#rrggbb`.
pub fn to_hex(color: Vec3) -> String {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    format!("#{:02x}{:02x}{:02x}", c.x as u8, c.y as u8, c.z as u8)
}
