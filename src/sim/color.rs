//! Figure colors
//!
//! New figures draw from a fixed six-color palette; "change colors" draws
//! from the whole hue circle at full saturation and brightness.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const ORANGE: Rgb = Rgb::new(255, 200, 0);
    pub const PINK: Rgb = Rgb::new(255, 175, 175);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from hue/saturation/brightness, each in 0..=1.
    ///
    /// The hue wraps, so only its fractional part matters.
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let saturation = saturation.clamp(0.0, 1.0);
        let brightness = brightness.clamp(0.0, 1.0);

        if saturation == 0.0 {
            let v = channel(brightness);
            return Self::new(v, v, v);
        }

        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));

        let (r, g, b) = match h as u32 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };

        Self::new(channel(r), channel(g), channel(b))
    }

    /// Hex form, e.g. `#ff00aa`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[inline]
fn channel(v: f32) -> u8 {
    (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

/// Colors a newly added figure may receive
pub const PALETTE: [Rgb; 6] = [
    Rgb::BLUE,
    Rgb::GREEN,
    Rgb::YELLOW,
    Rgb::RED,
    Rgb::ORANGE,
    Rgb::PINK,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsb_primaries() {
        assert_eq!(Rgb::from_hsb(0.0, 1.0, 1.0), Rgb::RED);
        assert_eq!(Rgb::from_hsb(1.0 / 3.0, 1.0, 1.0), Rgb::GREEN);
        assert_eq!(Rgb::from_hsb(2.0 / 3.0, 1.0, 1.0), Rgb::BLUE);
    }

    #[test]
    fn test_hsb_hue_wraps() {
        assert_eq!(Rgb::from_hsb(1.0, 1.0, 1.0), Rgb::from_hsb(0.0, 1.0, 1.0));
        assert_eq!(Rgb::from_hsb(1.5, 1.0, 1.0), Rgb::from_hsb(0.5, 1.0, 1.0));
    }

    #[test]
    fn test_hsb_grey_when_unsaturated() {
        assert_eq!(Rgb::from_hsb(0.3, 0.0, 1.0), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::from_hsb(0.3, 0.0, 0.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_full_saturation_has_a_zero_channel() {
        for i in 0..100 {
            let c = Rgb::from_hsb(i as f32 / 100.0, 1.0, 1.0);
            assert!(c.r == 0 || c.g == 0 || c.b == 0, "{c:?}");
            assert!(c.r == 255 || c.g == 255 || c.b == 255, "{c:?}");
        }
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgb::PINK.to_hex(), "#ffafaf");
    }
}
