//! Color space conversions: hex ⇄ RGB ⇄ HSL.
//!
//! These back the color converter tool and are also handy for anything that
//! needs to normalize user-supplied colors before rendering them into CSS.
//!
//! ## Precision
//!
//! | Conversion | Loss |
//! |---|---|
//! | hex ⇄ RGB | none once channels are integral |
//! | RGB → HSL ([`rgb_to_hsl`]) | h, s, l rounded to whole numbers |
//! | RGB → HSL ([`Hsl::from_rgb_exact`]) | none (floating point only) |
//! | HSL → RGB | channels rounded; ±1 per channel after [`Hsl::from_rgb_exact`] |
//!
//! The rounded form is what the converter displays. The exact form exists so
//! callers that chain conversions don't accumulate the display rounding.
//! Going back from the rounded form can miss by several units per channel.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS functional notation, e.g. `rgb(255, 0, 0)`.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

/// A color in HSL notation: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Unrounded conversion from RGB.
    ///
    /// Same algorithm as [`rgb_to_hsl`] without the final rounding, so that
    /// `hsl_to_rgb` of the result reproduces the input within ±1 per channel.
    pub fn from_rgb_exact(rgb: Rgb) -> Self {
        let r = rgb.r as f64 / 255.0;
        let g = rgb.g as f64 / 255.0;
        let b = rgb.b as f64 / 255.0;

        let max_channel = rgb.r.max(rgb.g).max(rgb.b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let chroma = max - min;
        let l = (max + min) / 2.0;

        if chroma == 0.0 {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let s = chroma / (1.0 - (2.0 * l - 1.0).abs());
        let sector = if max_channel == rgb.r {
            ((g - b) / chroma).rem_euclid(6.0)
        } else if max_channel == rgb.g {
            (b - r) / chroma + 2.0
        } else {
            (r - g) / chroma + 4.0
        };

        Self::new(sector * 60.0, s * 100.0, l * 100.0)
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }

    /// CSS functional notation, e.g. `hsl(120, 100%, 50%)`.
    pub fn to_css(self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Parse `#rrggbb` (the `#` is optional) into RGB.
///
/// Anything other than exactly six hex digits is rejected; there is no
/// shorthand (`#fff`) support and no partial result.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || ColorError::InvalidHex(hex.to_string());

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };

    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Clamp each channel to [0, 255], round it, and format as `#rrggbb`.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Rgb::new(to_channel(r), to_channel(g), to_channel(b)).to_hex()
}

/// Clamp to [0, 255] then round half away from zero. NaN maps to 0.
fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round() as u8
}

/// Convert RGB to HSL with hue, saturation and lightness rounded to integers.
///
/// Achromatic colors (r = g = b) report hue 0 and saturation 0. A hue that
/// rounds up to 360 is reported as 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let exact = Hsl::from_rgb_exact(Rgb::new(r, g, b));
    let mut h = exact.h.round();
    if h >= 360.0 {
        h -= 360.0;
    }
    Hsl::new(h, exact.s.round(), exact.l.round())
}

/// Convert HSL (degrees, percent, percent) to RGB.
///
/// Hue wraps modulo 360; saturation and lightness are clamped to [0, 100].
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    if s == 0.0 {
        let gray = to_channel(l * 255.0);
        return Rgb::new(gray, gray, gray);
    }

    let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r1, g1, b1) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb::new(
        to_channel((r1 + m) * 255.0),
        to_channel((g1 + m) * 255.0),
        to_channel((b1 + m) * 255.0),
    )
}
