//! Human-readable formatting for byte counts

/// Formats a byte count using binary (1024-based) units, e.g. "2.5 MB"
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut size = bytes as f64 / THRESHOLD;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    let formatted = format!("{size:.1}");
    let formatted = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{} {}", formatted, UNITS[unit_index])
}
