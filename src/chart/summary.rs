//! Console table of the largest cohort segments.
//!
//! Printed when the user passes --summary. Rows are colored by the
//! segment's outcome label (the last element of its path).

use crate::parser::schema::Segment;

const RESET: &str = "\x1b[0m";

fn ansi_color_for(outcome: &str) -> &'static str {
    match outcome {
        "Graduate" => "\x1b[32m", // Green
        "Dropout" => "\x1b[31m",  // Red
        "Enrolled" => "\x1b[33m", // Yellow
        _ => "\x1b[90m",          // Gray
    }
}

fn outcome_of(segment: &Segment) -> &str {
    segment.path.rsplit(';').next().unwrap_or(&segment.path)
}

/// Create a rich text summary with percentages and table formatting
pub fn generate_text_summary(segments: &[Segment], max_lines: usize, total: u64) -> String {
    let mut lines = Vec::new();

    lines.push("  LARGEST COHORT SEGMENTS".to_string());
    lines.push("  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━┳━━━━━━━━━┓".to_string());
    lines.push(format!(
        "  ┃ {:<56} ┃ {:^8} ┃ {:^7} ┃",
        "Segment (Largest First)", "COUNT", "%"
    ));
    lines.push("  ┣━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━╋━━━━━━━━━┫".to_string());

    let total = total.max(1);

    for segment in segments.iter().take(max_lines) {
        let percentage = (segment.count as f64 / total as f64) * 100.0;
        let color = ansi_color_for(outcome_of(segment));

        // Truncate the path if too long for display
        let display_path = if segment.path.len() > 54 {
            format!("...{}", &segment.path[segment.path.len() - 51..])
        } else {
            segment.path.clone()
        };

        lines.push(format!(
            "  ┃ {}{:<56}{} ┃ {:>8} ┃ {:>6.1}% ┃",
            color, display_path, RESET, segment.count, percentage
        ));
    }

    lines.push("  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━┻━━━━━━━━━┛".to_string());

    // Proportional bars for the top segments
    lines.push(String::new());
    for segment in segments.iter().take(5) {
        let percentage = (segment.count as f64 / total as f64) * 100.0;
        let bar_width = (percentage / 2.0) as usize; // Max 50 chars
        let bar = "█".repeat(bar_width);

        let outcome = outcome_of(segment);
        let color = ansi_color_for(outcome);

        lines.push(format!(
            "  └─ {}{:<24}{} {}{:50}{} {:>5.1}%",
            color, outcome, RESET, color, bar, RESET, percentage
        ));
    }

    if segments.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} segments)",
            max_lines,
            segments.len()
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(path: &str, count: u64, percentage: f64) -> Segment {
        Segment {
            path: path.to_string(),
            count,
            percentage,
        }
    }

    #[test]
    fn test_summary_contains_counts_and_percentages() {
        let segments = vec![
            segment("Has Debt;Tuition Not Up to Date;Holds Scholarship;Graduate", 3, 75.0),
            segment("No Debt;Tuition Up to Date;No Scholarship;Dropout", 1, 25.0),
        ];

        let text = generate_text_summary(&segments, 10, 4);

        assert!(text.contains("LARGEST COHORT SEGMENTS"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("25.0%"));
        assert!(text.contains('3'));
    }

    #[test]
    fn test_summary_truncation_notice() {
        let segments: Vec<Segment> = (0..5)
            .map(|i| segment(&format!("A;B;C;Graduate{}", i), 1, 20.0))
            .collect();

        let text = generate_text_summary(&segments, 2, 5);
        assert!(text.contains("(Showing top 2 of 5 segments)"));
    }

    #[test]
    fn test_summary_empty_segments() {
        let text = generate_text_summary(&[], 10, 0);
        assert!(text.contains("LARGEST COHORT SEGMENTS"));
    }
}
