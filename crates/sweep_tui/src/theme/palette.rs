//! Sweep palette. Track and accent are fixed design colours shared by both appearances.

use super::Appearance;
use super::rgb::Rgb;

/// Muted track behind the segment.
pub const TRACK: Rgb = Rgb::hex(0x1A3D32);
/// Moving segment.
pub const ACCENT: Rgb = Rgb::hex(0x03D47C);

#[derive(Clone, Debug, PartialEq)]
pub struct SweepPalette {
    /// App background; the indicator fades toward it.
    pub background: Rgb,
    pub surface_background: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub text_muted: Rgb,
    pub track: Rgb,
    pub accent: Rgb,
    pub warning: Rgb,
    pub info: Rgb,
}

impl SweepPalette {
    pub fn sweep_dark() -> Self {
        Self {
            background: Rgb(8, 8, 12),
            surface_background: Rgb(16, 17, 24),
            border: Rgb(28, 30, 42),
            text: Rgb(200, 210, 245),
            text_muted: Rgb(70, 78, 110),
            track: TRACK,
            accent: ACCENT,
            warning: Rgb(240, 185, 100),
            info: Rgb(100, 200, 255),
        }
    }

    pub fn sweep_light() -> Self {
        Self {
            background: Rgb(255, 255, 255),
            surface_background: Rgb(248, 248, 248),
            border: Rgb(229, 229, 229),
            text: Rgb(26, 27, 38),
            text_muted: Rgb(86, 95, 137),
            track: TRACK,
            accent: ACCENT,
            warning: Rgb(224, 175, 104),
            info: Rgb(125, 207, 255),
        }
    }

    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Dark => Self::sweep_dark(),
            Appearance::Light => Self::sweep_light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_and_accent_do_not_depend_on_appearance() {
        let dark = SweepPalette::sweep_dark();
        let light = SweepPalette::sweep_light();
        assert_eq!(dark.track, light.track);
        assert_eq!(dark.accent, light.accent);
        assert_ne!(dark.background, light.background);
    }

    #[test]
    fn appearance_selects_palette() {
        assert_eq!(SweepPalette::for_appearance(Appearance::Dark), SweepPalette::sweep_dark());
        assert_eq!(SweepPalette::for_appearance(Appearance::Light), SweepPalette::sweep_light());
    }
}
