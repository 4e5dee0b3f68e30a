//! Terminal output helpers: colors and size formatting.

use console::{StyledObject, style};

use crate::config::SizeUnit;

/// Enable or disable colors for everything printed through `console`.
///
/// Honors `--no-color` and the `NO_COLOR` convention; otherwise `console`
/// decides from the terminal.
pub fn init_colors(no_color: bool) {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

/// Format a byte count in the requested unit.
///
/// # Examples
///
/// ```
/// use tally_cli::config::SizeUnit;
/// use tally_cli::ui::format_size;
///
/// assert_eq!(format_size(1536, SizeUnit::Bytes), "1536 B");
/// assert_eq!(format_size(1536, SizeUnit::Kib), "1.50 KiB");
/// assert_eq!(format_size(1_048_576, SizeUnit::Human), "1.00 MB");
/// ```
pub fn format_size(bytes: u64, unit: SizeUnit) -> String {
    match unit {
        SizeUnit::Bytes => format!("{bytes} B"),
        SizeUnit::Kib => format!("{:.2} KiB", bytes as f64 / 1024.0),
        SizeUnit::Human => format_human(bytes),
    }
}

fn format_human(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{size:.2} {}", UNITS[unit_idx])
    }
}

/// Style for entity names.
pub fn entity(name: &str) -> StyledObject<&str> {
    style(name).cyan()
}

/// Style for secondary details such as icons.
pub fn dim(text: &str) -> StyledObject<&str> {
    style(text).dim()
}

/// Style for headings.
pub fn heading(text: &str) -> StyledObject<&str> {
    style(text).bold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_sizes_pick_largest_unit() {
        assert_eq!(format_size(0, SizeUnit::Human), "0 B");
        assert_eq!(format_size(500, SizeUnit::Human), "500 B");
        assert_eq!(format_size(1024, SizeUnit::Human), "1.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024, SizeUnit::Human), "3.00 GB");
        assert_eq!(format_size(5 * 1024u64.pow(4), SizeUnit::Human), "5120.00 GB");
    }

    #[test]
    fn kib_always_uses_kib() {
        assert_eq!(format_size(0, SizeUnit::Kib), "0.00 KiB");
        assert_eq!(format_size(2048, SizeUnit::Kib), "2.00 KiB");
    }

    #[test]
    fn bytes_are_exact() {
        assert_eq!(format_size(123_456, SizeUnit::Bytes), "123456 B");
    }
}
