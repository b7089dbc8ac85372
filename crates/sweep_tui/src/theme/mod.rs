//! Sweep theme: the fixed track and accent colours plus the chrome around the demo.
//!
//! # Example
//!
//! ```
//! use sweep_tui::theme::{Appearance, SweepPalette};
//!
//! let palette = SweepPalette::for_appearance(Appearance::Dark);
//! assert_eq!(palette.accent.tuple(), (0x03, 0xD4, 0x7C));
//! ```

mod appearance;
mod palette;
mod rgb;

pub use appearance::Appearance;
pub use palette::SweepPalette;
pub use rgb::Rgb;
