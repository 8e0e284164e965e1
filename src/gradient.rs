//! CSS gradient generation.
//!
//! Turns a list of color stops into a `linear-gradient(...)` or
//! `radial-gradient(...)` value:
//!
//! ```text
//! stops  [#0000ff @ 100, #ff0000 @ 0]   angle 90   linear
//!   →    linear-gradient(90deg, #ff0000 0%, #0000ff 100%)
//! ```
//!
//! Colors are opaque: anything CSS accepts (`#hex`, `rgb()`, `hsl()`, named
//! colors) is passed through untouched. Positions are percentages and are
//! not clamped, so `-10` or `120` render as given.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GradientError {
    #[error("unknown gradient type: {0} (expected linear or radial)")]
    UnknownKind(String),
    #[error("invalid color stop: {0:?} (expected \"<color> <position>\")")]
    InvalidStop(String),
}

/// Gradient shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

impl FromStr for GradientKind {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "radial" => Ok(Self::Radial),
            _ => Err(GradientError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Radial => f.write_str("radial"),
        }
    }
}

/// One point along a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Any CSS color expression.
    pub color: String,
    /// Position in percent.
    pub position: f64,
}

impl ColorStop {
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self {
            color: color.into(),
            position,
        }
    }

    /// Parse the command-line stop syntax: `<color> <position>[%]` or
    /// `<color>@<position>[%]`.
    ///
    /// The separator is the *last* space or `@`, so colors containing spaces
    /// (`rgb(0, 0, 0) 50`) work.
    pub fn parse(input: &str) -> Result<Self, GradientError> {
        let invalid = || GradientError::InvalidStop(input.to_string());
        let trimmed = input.trim();
        let split = trimmed.rfind([' ', '@']).ok_or_else(invalid)?;

        let color = trimmed[..split].trim();
        let position = trimmed[split + 1..].trim();
        let position = position.strip_suffix('%').unwrap_or(position);

        if color.is_empty() {
            return Err(invalid());
        }
        let position: f64 = position.parse().map_err(|_| invalid())?;
        if !position.is_finite() {
            return Err(invalid());
        }

        Ok(Self::new(color, position))
    }

    fn to_css(&self) -> String {
        format!("{} {}%", self.color, css_number(self.position))
    }
}

/// `-0` prints as `0`.
fn css_number(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// A complete gradient definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub stops: Vec<ColorStop>,
    /// Direction in degrees. Only used by linear gradients.
    pub angle: f64,
    pub kind: GradientKind,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            stops: Vec::new(),
            angle: 90.0,
            kind: GradientKind::Linear,
        }
    }
}

impl Gradient {
    pub fn to_css(&self) -> String {
        generate_gradient_css(&self.stops, self.angle, self.kind)
    }
}

/// Render stops as a CSS gradient value.
///
/// Stops are stable-sorted by position first, so equal positions keep the
/// order they were given in. Numbers use the shortest round-tripping
/// representation: `0` stays `0`, `12.5` stays `12.5`.
pub fn generate_gradient_css(stops: &[ColorStop], angle: f64, kind: GradientKind) -> String {
    let mut sorted: Vec<&ColorStop> = stops.iter().collect();
    sorted.sort_by(|a, b| a.position.total_cmp(&b.position));

    let rendered: Vec<String> = sorted.iter().map(|stop| stop.to_css()).collect();

    let head = match kind {
        GradientKind::Linear => format!("linear-gradient({}deg", css_number(angle)),
        GradientKind::Radial => "radial-gradient(circle".to_string(),
    };

    if rendered.is_empty() {
        format!("{})", head)
    } else {
        format!("{}, {})", head, rendered.join(", "))
    }
}
