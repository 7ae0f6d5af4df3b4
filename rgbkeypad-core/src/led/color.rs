//! RGB color values

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 8-bit per channel RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const CYAN: Self = Self::new(0, 255, 255);
    pub const MAGENTA: Self = Self::new(255, 0, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Check if all channels are zero
    pub const fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.r, c.g, c.b)
    }
}

/// Convert a hue/saturation/value triple to RGB
///
/// Saturation and value are clamped to 0.0..=1.0. Hue wraps around, so
/// 1.0, 2.0 and -1.0 are all red again.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let scale = |c: f32| (c * 255.0) as u8;

    if s == 0.0 {
        let gray = scale(v);
        return Rgb::new(gray, gray, gray);
    }

    let h = wrap_unit(h) * 6.0;
    let sector = h as u8;
    let f = h - sector as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(scale(r), scale(g), scale(b))
}

/// Fractional part of `x`, in 0.0..1.0 (non-finite input maps to 0.0)
fn wrap_unit(x: f32) -> f32 {
    if !x.is_finite() {
        return 0.0;
    }
    let frac = x - (x as i64) as f32;
    if frac < 0.0 {
        frac + 1.0
    } else {
        frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_black() {
        assert!(Rgb::BLACK.is_black());
        assert!(!Rgb::new(0, 0, 1).is_black());
    }

    #[test]
    fn test_hsv_hue_wraps() {
        assert_eq!(hsv_to_rgb(1.5, 1.0, 1.0), hsv_to_rgb(0.5, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(1.5, 1.0, 1.0), Rgb::CYAN);
        assert_eq!(hsv_to_rgb(-0.5, 1.0, 1.0), Rgb::CYAN);
        assert_eq!(hsv_to_rgb(-1.0 / 3.0, 1.0, 1.0), Rgb::BLUE);
        assert_eq!(hsv_to_rgb(2.0, 1.0, 1.0), Rgb::RED);
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::RED);
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), Rgb::GREEN);
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), Rgb::BLUE);
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), Rgb::RED);
    }

    #[test]
    fn test_hsv_gray_and_black() {
        assert_eq!(hsv_to_rgb(0.3, 0.0, 1.0), Rgb::WHITE);
        assert_eq!(hsv_to_rgb(0.3, 1.0, 0.0), Rgb::BLACK);
    }
}
