/// Terminal palette: the dark theme draws heavy rules, the light theme thin
/// ones.
pub const RULE_WIDTH: usize = 64;

pub fn rule(dark_mode: bool) -> String {
    let glyph = if dark_mode { "\u{2501}" } else { "\u{2500}" };
    glyph.repeat(RULE_WIDTH)
}

pub fn column_header(label: &str, count: usize) -> String {
    format!("\u{25A0} {} ({})", label, count)
}

pub fn format_distance(distance: f64) -> String {
    format!("{:.4}", distance)
}

/// Approximate decoded size of a base64 payload.
pub fn payload_size(base64_image: &str) -> String {
    let bytes = base64_image.trim_end_matches('=').len() * 3 / 4;
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.123456), "0.1235");
        assert_eq!(format_distance(0.0), "0.0000");
    }

    #[test]
    fn test_payload_size() {
        assert_eq!(payload_size("aGVsbG8="), "5 B");
        assert_eq!(payload_size(&"A".repeat(4096)), "3.0 KB");
    }

    #[test]
    fn test_rule_width_by_theme() {
        assert_ne!(rule(true), rule(false));
        assert_eq!(rule(false).chars().count(), RULE_WIDTH);
    }
}
