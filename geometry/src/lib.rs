//! Screen space geometry primitives used by the gesture recognizer and the window manager.
//!
//! Coordinates are logical pixels, x grows to the right and y grows downward.

mod line;
mod point;
mod rect;
mod size;

pub use line::*;
pub use point::*;
pub use rect::*;
pub use size::*;

pub const EPSILON: f64 = f64::EPSILON;

/// Normalizes an angle in degrees into the range `(-180, 180]`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    euclid::Angle::degrees(degrees).signed().to_degrees()
}

/// Rounds `value` to the nearest multiple of `spacing`. A non-positive spacing leaves the value
/// untouched.
pub fn round_to_multiple(value: f64, spacing: f64) -> f64 {
    if spacing <= 0.0 {
        return value;
    }
    (value / spacing).round() * spacing
}
