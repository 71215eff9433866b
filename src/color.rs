//! Activation color interpolation.

use serde::{Deserialize, Serialize};

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Color of a neuron or connection whose normalized value is zero.
    pub const NEUTRAL: Rgb = Rgb::new(50, 50, 50);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.r, c.g, c.b)
    }
}

/// Maps a normalized value to a color: pink for negative, green for
/// positive, dark grey at zero.
///
/// # Panics
///
/// Panics if `x` is not within `[-1, 1]` (NaN included). Callers normalize
/// before calling.
pub fn activation_color(x: f64) -> Rgb {
    assert!(
        (-1.0..=1.0).contains(&x),
        "value has to be between -1 and 1, got {x}"
    );
    // `as u8` truncates toward zero; the coefficients keep every channel in range.
    if x < 0.0 {
        Rgb::new(
            (-x * 205.0 + 50.0) as u8,
            (x * 50.0 + 50.0) as u8,
            (-x * 130.0 + 50.0) as u8,
        )
    } else {
        Rgb::new(
            (-x * 50.0 + 50.0) as u8,
            (x * 205.0 + 50.0) as u8,
            (-x * 50.0 + 50.0) as u8,
        )
    }
}
