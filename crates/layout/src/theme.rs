use auditpdf_types::{Color, Status};

/// Visual treatment of one status: its badge and the callout holding the
/// item's explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusStyle {
    pub label: String,
    pub fill: Color,
    pub text: Color,
    pub border: Color,
    pub callout_label: String,
}

impl StatusStyle {
    fn new(label: &str, fill: &str, text: &str, border: &str, callout_label: &str) -> Self {
        Self {
            label: label.to_string(),
            fill: hex(fill),
            text: hex(text),
            border: hex(border),
            callout_label: callout_label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusTheme {
    pub pass: StatusStyle,
    pub fail: StatusStyle,
    pub optional: StatusStyle,
    pub pending: StatusStyle,
}

impl Default for StatusTheme {
    fn default() -> Self {
        Self {
            pass: StatusStyle::new("PASS", "#dcfce7", "#166534", "#22c55e", "Notes"),
            fail: StatusStyle::new(
                "FAIL",
                "#fef2f2",
                "#dc2626",
                "#ef4444",
                "Issue & Recommendations",
            ),
            optional: StatusStyle::new("OPTIONAL", "#fff3cd", "#856404", "#f59e0b", "Optional Notes"),
            pending: StatusStyle::new("PENDING", "#fefce8", "#854d0e", "#F2CA05", "Notes"),
        }
    }
}

impl StatusTheme {
    pub fn style(&self, status: Status) -> &StatusStyle {
        match status {
            Status::Pass => &self.pass,
            Status::Fail => &self.fail,
            Status::Optional => &self.optional,
            Status::Pending => &self.pending,
        }
    }
}

/// Colours shared by every page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: Color,
    pub dark: Color,
    pub text: Color,
    pub muted: Color,
    pub rule: Color,
    pub surface: Color,
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: hex("#F2CA05"),
            dark: hex("#363636"),
            text: hex("#1f2937"),
            muted: hex("#6b7280"),
            rule: hex("#e5e7eb"),
            surface: hex("#f9fafb"),
            background: Color::WHITE,
        }
    }
}

// Only called with the literals above.
fn hex(value: &str) -> Color {
    Color::parse_hex(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callout_labels_follow_status() {
        let theme = StatusTheme::default();
        assert_eq!(theme.style(Status::Fail).callout_label, "Issue & Recommendations");
        assert_eq!(theme.style(Status::Optional).callout_label, "Optional Notes");
        assert_eq!(theme.style(Status::Pass).callout_label, "Notes");
        assert_eq!(theme.style(Status::Pending).callout_label, "Notes");
    }

    #[test]
    fn default_colours_parse() {
        let theme = StatusTheme::default();
        assert_eq!(theme.pass.border, Color::rgb(0x22, 0xc5, 0x5e));
        assert_eq!(Palette::default().accent, Color::rgb(0xF2, 0xCA, 0x05));
    }
}
