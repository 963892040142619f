use serde::{Deserialize, Serialize};
use std::fmt;

/// Length units accepted at the host boundary. The solver itself works
/// in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LengthUnit {
    #[default]
    Millimeter,
    Centimeter,
    Meter,
    Inch,
}

impl LengthUnit {
    pub fn to_mm(&self, value: f64) -> f64 {
        match self {
            Self::Millimeter => value,
            Self::Centimeter => value * 10.0,
            Self::Meter => value * 1000.0,
            Self::Inch => value * 25.4,
        }
    }

    pub fn from_mm(&self, mm: f64) -> f64 {
        match self {
            Self::Millimeter => mm,
            Self::Centimeter => mm / 10.0,
            Self::Meter => mm / 1000.0,
            Self::Inch => mm / 25.4,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeter => write!(f, "mm"),
            Self::Centimeter => write!(f, "cm"),
            Self::Meter => write!(f, "m"),
            Self::Inch => write!(f, "in"),
        }
    }
}

/// Angle units accepted at the host boundary. The solver itself works in
/// radians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn to_radians(&self, value: f64) -> f64 {
        match self {
            Self::Degrees => value * std::f64::consts::PI / 180.0,
            Self::Radians => value,
        }
    }

    pub fn from_radians(&self, radians: f64) -> f64 {
        match self {
            Self::Degrees => radians * 180.0 / std::f64::consts::PI,
            Self::Radians => radians,
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees => write!(f, "deg"),
            Self::Radians => write!(f, "rad"),
        }
    }
}
