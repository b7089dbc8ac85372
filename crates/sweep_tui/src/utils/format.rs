//! Formatting helpers for TUI text (durations, truncation).

use std::time::Duration;

/// Format a duration for display (e.g. "123ms", "2s 450ms").
///
/// Uses milliseconds when under 1s, otherwise seconds and milliseconds.
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        let s = ms / 1000;
        let rest_ms = ms % 1000;
        if rest_ms == 0 {
            format!("{}s", s)
        } else {
            format!("{}s {}ms", s, rest_ms)
        }
    }
}

/// Fixed-width "+SS.mmm" timestamp for log lines.
pub fn format_elapsed(d: Duration) -> String {
    format!("+{:>3}.{:03}", d.as_secs(), d.subsec_millis())
}

/// Truncate to `max_width` characters with "…" when needed.
pub fn truncate_ellipsis(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max_width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(750)), "750ms");
        assert_eq!(format_duration(Duration::from_millis(2000)), "2s");
        assert_eq!(format_duration(Duration::from_millis(2450)), "2s 450ms");
    }

    #[test]
    fn elapsed_is_fixed_width() {
        assert_eq!(format_elapsed(Duration::from_millis(1050)), "+  1.050");
        assert_eq!(format_elapsed(Duration::from_millis(123_004)), "+123.004");
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_ellipsis("looping", 10), "looping");
        assert_eq!(truncate_ellipsis("looping", 4), "loo…");
        assert_eq!(truncate_ellipsis("looping", 0), "");
    }
}
