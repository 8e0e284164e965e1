//! Unit conversion within a category.
//!
//! Linear units convert through the category's base unit (metre, gram,
//! byte). Temperatures go through Celsius.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("unknown unit: {0}")]
    Unknown(String),
    #[error("cannot convert {from} ({from_category}) to {to} ({to_category})")]
    Incompatible {
        from: Unit,
        to: Unit,
        from_category: Category,
        to_category: Category,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Temperature,
    Data,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Temperature => "temperature",
            Self::Data => "data",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    Inch,
    Foot,
    Yard,
    Mile,
    Milligram,
    Gram,
    Kilogram,
    Ounce,
    Pound,
    Celsius,
    Fahrenheit,
    Kelvin,
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
}

impl Unit {
    pub const ALL: [Unit; 21] = [
        Self::Millimeter,
        Self::Centimeter,
        Self::Meter,
        Self::Kilometer,
        Self::Inch,
        Self::Foot,
        Self::Yard,
        Self::Mile,
        Self::Milligram,
        Self::Gram,
        Self::Kilogram,
        Self::Ounce,
        Self::Pound,
        Self::Celsius,
        Self::Fahrenheit,
        Self::Kelvin,
        Self::Byte,
        Self::Kilobyte,
        Self::Megabyte,
        Self::Gigabyte,
        Self::Terabyte,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Kilometer => "km",
            Self::Inch => "in",
            Self::Foot => "ft",
            Self::Yard => "yd",
            Self::Mile => "mi",
            Self::Milligram => "mg",
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Ounce => "oz",
            Self::Pound => "lb",
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
            Self::Kelvin => "K",
            Self::Byte => "B",
            Self::Kilobyte => "KB",
            Self::Megabyte => "MB",
            Self::Gigabyte => "GB",
            Self::Terabyte => "TB",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::Millimeter
            | Self::Centimeter
            | Self::Meter
            | Self::Kilometer
            | Self::Inch
            | Self::Foot
            | Self::Yard
            | Self::Mile => Category::Length,
            Self::Milligram | Self::Gram | Self::Kilogram | Self::Ounce | Self::Pound => {
                Category::Mass
            }
            Self::Celsius | Self::Fahrenheit | Self::Kelvin => Category::Temperature,
            Self::Byte | Self::Kilobyte | Self::Megabyte | Self::Gigabyte | Self::Terabyte => {
                Category::Data
            }
        }
    }

    /// Size in the category's base unit. Temperatures are not linear and
    /// have no factor.
    fn factor(self) -> Option<f64> {
        let factor = match self {
            Self::Millimeter => 0.001,
            Self::Centimeter => 0.01,
            Self::Meter => 1.0,
            Self::Kilometer => 1000.0,
            Self::Inch => 0.0254,
            Self::Foot => 0.3048,
            Self::Yard => 0.9144,
            Self::Mile => 1609.344,
            Self::Milligram => 0.001,
            Self::Gram => 1.0,
            Self::Kilogram => 1000.0,
            Self::Ounce => 28.349_523_125,
            Self::Pound => 453.592_37,
            Self::Byte => 1.0,
            Self::Kilobyte => 1024.0,
            Self::Megabyte => 1024.0 * 1024.0,
            Self::Gigabyte => 1024.0 * 1024.0 * 1024.0,
            Self::Terabyte => 1024.0 * 1024.0 * 1024.0 * 1024.0,
            Self::Celsius | Self::Fahrenheit | Self::Kelvin => return None,
        };
        Some(factor)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    /// Case-insensitive; `lbs`, `°C` and `°F` are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unit = match trimmed.to_ascii_lowercase().as_str() {
            "mm" => Self::Millimeter,
            "cm" => Self::Centimeter,
            "m" => Self::Meter,
            "km" => Self::Kilometer,
            "in" => Self::Inch,
            "ft" => Self::Foot,
            "yd" => Self::Yard,
            "mi" => Self::Mile,
            "mg" => Self::Milligram,
            "g" => Self::Gram,
            "kg" => Self::Kilogram,
            "oz" => Self::Ounce,
            "lb" | "lbs" => Self::Pound,
            "c" | "°c" => Self::Celsius,
            "f" | "°f" => Self::Fahrenheit,
            "k" => Self::Kelvin,
            "b" => Self::Byte,
            "kb" => Self::Kilobyte,
            "mb" => Self::Megabyte,
            "gb" => Self::Gigabyte,
            "tb" => Self::Terabyte,
            _ => return Err(UnitError::Unknown(trimmed.to_string())),
        };
        Ok(unit)
    }
}

fn to_celsius(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        Unit::Kelvin => value - 273.15,
        _ => value,
    }
}

fn from_celsius(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Fahrenheit => value * 9.0 / 5.0 + 32.0,
        Unit::Kelvin => value + 273.15,
        _ => value,
    }
}

pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, UnitError> {
    if from.category() != to.category() {
        return Err(UnitError::Incompatible {
            from,
            to,
            from_category: from.category(),
            to_category: to.category(),
        });
    }
    if from == to {
        return Ok(value);
    }
    match (from.factor(), to.factor()) {
        (Some(from_factor), Some(to_factor)) => Ok(value * from_factor / to_factor),
        _ => Ok(from_celsius(to_celsius(value, from), to)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    // =========================================================================
    // convert
    // =========================================================================

    #[test]
    fn length_conversions() {
        assert!(close(convert(1.0, Unit::Mile, Unit::Kilometer).unwrap(), 1.609344));
        assert!(close(convert(12.0, Unit::Inch, Unit::Foot).unwrap(), 1.0));
        assert!(close(convert(250.0, Unit::Centimeter, Unit::Meter).unwrap(), 2.5));
    }

    #[test]
    fn mass_conversions() {
        assert!(close(convert(1.0, Unit::Pound, Unit::Ounce).unwrap(), 16.0));
        assert!(close(convert(2.5, Unit::Kilogram, Unit::Gram).unwrap(), 2500.0));
    }

    #[test]
    fn temperature_conversions() {
        assert!(close(convert(100.0, Unit::Celsius, Unit::Fahrenheit).unwrap(), 212.0));
        assert!(close(convert(32.0, Unit::Fahrenheit, Unit::Celsius).unwrap(), 0.0));
        assert!(close(convert(0.0, Unit::Kelvin, Unit::Celsius).unwrap(), -273.15));
        assert!(close(convert(-40.0, Unit::Fahrenheit, Unit::Celsius).unwrap(), -40.0));
        assert!(close(convert(300.0, Unit::Kelvin, Unit::Fahrenheit).unwrap(), 80.33));
    }

    #[test]
    fn data_is_binary() {
        assert_eq!(convert(1.0, Unit::Megabyte, Unit::Kilobyte).unwrap(), 1024.0);
        assert_eq!(convert(2048.0, Unit::Gigabyte, Unit::Terabyte).unwrap(), 2.0);
    }

    #[test]
    fn same_unit_is_identity() {
        assert_eq!(convert(3.7, Unit::Kelvin, Unit::Kelvin).unwrap(), 3.7);
    }

    #[test]
    fn cross_category_is_incompatible() {
        let err = convert(1.0, Unit::Meter, Unit::Kilogram).unwrap_err();
        assert!(matches!(err, UnitError::Incompatible { .. }));
        assert_eq!(err.to_string(), "cannot convert m (length) to kg (mass)");
    }

    // =========================================================================
    // parsing
    // =========================================================================

    #[test]
    fn symbols_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(unit.symbol().parse::<Unit>().unwrap(), unit);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("KM".parse::<Unit>().unwrap(), Unit::Kilometer);
        assert_eq!("lbs".parse::<Unit>().unwrap(), Unit::Pound);
        assert_eq!("gb".parse::<Unit>().unwrap(), Unit::Gigabyte);
    }

    #[test]
    fn unknown_unit() {
        assert_eq!(
            "parsec".parse::<Unit>(),
            Err(UnitError::Unknown("parsec".into()))
        );
    }
}
