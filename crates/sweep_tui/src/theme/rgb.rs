//! RGB colour for the theme, with linear blending for opacity.

/// RGB triplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// From a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Tuple for ratatui/crossterm: `(r, g, b)`.
    pub fn tuple(self) -> (u8, u8, u8) {
        (self.0, self.1, self.2)
    }

    /// `self` at `t = 0`, `to` at `t = 1`. `t` is clamped.
    pub fn lerp(self, to: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, to.0), mix(self.1, to.1), mix(self.2, to.2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_splits_channels() {
        assert_eq!(Rgb::hex(0x1A3D32), Rgb(0x1A, 0x3D, 0x32));
        assert_eq!(Rgb::hex(0x1A3D32).tuple(), (0x1A, 0x3D, 0x32));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb(0, 100, 200);
        let b = Rgb(100, 200, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb(50, 150, 100));
        assert_eq!(a.lerp(b, 7.0), b);
    }
}
