//! Chart generation: treemap and sunburst SVG, colors, console summary.
//!
//! Both charts consume the sorted hierarchy and emit self-contained SVG
//! with per-node tooltips (`<title>`) and a static legend.

pub mod palette;
pub mod summary;
pub mod sunburst;
pub mod treemap;

// Re-export main types and functions
pub use palette::{color_for, DimensionPalette, DIMENSION_PALETTES, FALLBACK_COLOR};
pub use summary::generate_text_summary;
pub use sunburst::generate_sunburst;
pub use treemap::generate_treemap;

use crate::hierarchy::percent;
use crate::utils::config::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Student Cohort Breakdown".to_string(),
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Escape text for embedding in SVG
pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Tooltip body: ancestor label path, count and share of the total.
/// The root itself is not part of the displayed sequence.
pub(crate) fn tooltip(path: &[String], count: u64, total: u64) -> String {
    format!(
        "{}\nCount: {} ({:.1}%)",
        escape(&path.join(" \u{2192} ")),
        count,
        percent(count, total)
    )
}

/// Static legend: the outcome palette under its category header
pub(crate) fn render_legend(out: &mut String, x: usize, y: usize) {
    let (header, entries) = palette::legend_entries();

    out.push_str(&format!(
        r#"<text x="{}" y="{}" font-size="14" font-weight="bold">{}</text>"#,
        x, y, header
    ));

    let mut offset = y + 20;
    for (label, color) in entries {
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="15" height="15" fill="{}" rx="2"/>"#,
            x,
            offset - 12,
            color
        ));
        out.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="13">{}</text>"#,
            x + 22,
            offset,
            label
        ));
        offset += 22;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ChartConfig::new().with_title("Cohort").with_size(800, 600);
        assert_eq!(config.title, "Cohort");
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn test_tooltip_format() {
        let path = vec!["Has Debt".to_string(), "Graduate".to_string()];
        let text = tooltip(&path, 2, 3);
        assert_eq!(text, "Has Debt \u{2192} Graduate\nCount: 2 (66.7%)");
    }
}
