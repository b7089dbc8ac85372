//! Layout pieces for the demo: header strip, progress track widget, shortcut footer.

pub mod head;
pub mod shortcut;
pub mod style;
pub mod track;

pub use head::{HEADER_TITLE, header_line, render_header};
pub use shortcut::shortcut_line;
pub use style::{background_style, border_style, rgb_to_color, text_muted_style, text_style};
pub use track::{ProgressTrack, segment_columns};
