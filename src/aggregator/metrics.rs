//! Segment metrics derived from the frequency tree.
//!
//! A segment is a fully-specified label path (one label per dimension).
//! The largest segments are the primary subject of the summary output.

use super::frequency::FrequencyNode;
use super::labels::LabeledStudent;
use crate::parser::schema::{CohortBreakdown, Segment};
use log::debug;
use std::collections::HashMap;

/// Calculate the largest segments of the cohort
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `tree` - frequency tree from the aggregator
/// * `total` - total number of records
/// * `top_n` - number of top segments to return (e.g. 10)
///
/// # Returns
/// Vector of segments, sorted by record count (descending)
pub fn calculate_top_segments(tree: &FrequencyNode, total: u64, top_n: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    collect_segments(tree, &mut Vec::new(), &mut segments, total);

    segments.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.path.cmp(&b.path)));
    segments.truncate(top_n);

    debug!("Calculated top {} of {} segments", segments.len(), top_n);
    segments
}

/// Depth-first walk collecting every leaf path
///
/// **Private** - internal helper for calculate_top_segments
fn collect_segments(
    node: &FrequencyNode,
    prefix: &mut Vec<String>,
    out: &mut Vec<Segment>,
    total: u64,
) {
    match node {
        FrequencyNode::Leaf(count) => {
            let percentage = if total > 0 {
                (*count as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            out.push(Segment {
                path: prefix.join(";"),
                count: *count,
                percentage,
            });
        }
        FrequencyNode::Branch(entries) => {
            for (label, child) in entries {
                prefix.push(label.clone());
                collect_segments(child, prefix, out, total);
                prefix.pop();
            }
        }
    }
}

/// Marginal counts per dimension, accumulated over labeled records
#[derive(Debug, Clone, Default)]
pub struct CohortStats {
    by_debt: HashMap<String, u64>,
    by_tuition: HashMap<String, u64>,
    by_scholarship: HashMap<String, u64>,
    by_outcome: HashMap<String, u64>,
    total: u64,
}

impl CohortStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate marginal counts over the whole cohort
    pub fn collect(students: &[LabeledStudent]) -> Self {
        let mut stats = Self::new();
        for student in students {
            stats.add(student);
        }
        stats
    }

    fn add(&mut self, student: &LabeledStudent) {
        *self
            .by_debt
            .entry(student.debt.label().to_string())
            .or_insert(0) += 1;
        *self
            .by_tuition
            .entry(student.tuition.label().to_string())
            .or_insert(0) += 1;
        *self
            .by_scholarship
            .entry(student.scholarship.label().to_string())
            .or_insert(0) += 1;
        *self
            .by_outcome
            .entry(student.outcome.label().to_string())
            .or_insert(0) += 1;
        self.total += 1;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count_for_outcome(&self, label: &str) -> u64 {
        self.by_outcome.get(label).copied().unwrap_or(0)
    }

    /// Convert to the breakdown included in the final summary
    pub fn to_breakdown(&self) -> CohortBreakdown {
        CohortBreakdown {
            by_debt: self.by_debt.clone(),
            by_tuition: self.by_tuition.clone(),
            by_scholarship: self.by_scholarship.clone(),
            by_outcome: self.by_outcome.clone(),
        }
    }
}

/// Concentration statistics over the segment sizes
///
/// **Public** - returned from calculate_segment_distribution
#[derive(Debug, Clone, Default)]
pub struct SegmentDistribution {
    /// Total records across all segments
    pub total_records: u64,

    /// Number of non-empty segments
    pub segment_count: usize,

    /// Mean records per segment
    pub mean_per_segment: u64,

    /// Median records per segment
    pub median_per_segment: u64,

    /// Records in the largest segment
    pub largest_segment: u64,

    /// Percentage of records in the largest segment
    pub largest_segment_percentage: f64,
}

/// Calculate distribution statistics over segments
///
/// # Arguments
/// * `segments` - segments sorted descending by count
pub fn calculate_segment_distribution(segments: &[Segment]) -> SegmentDistribution {
    if segments.is_empty() {
        return SegmentDistribution::default();
    }

    let total: u64 = segments.iter().map(|s| s.count).sum();
    let count = segments.len();
    let mean = total / count.max(1) as u64;

    let mut counts: Vec<u64> = segments.iter().map(|s| s.count).collect();
    counts.sort_unstable();
    let median = counts[counts.len() / 2];

    let largest = segments.iter().map(|s| s.count).max().unwrap_or(0);

    SegmentDistribution {
        total_records: total,
        segment_count: count,
        mean_per_segment: mean,
        median_per_segment: median,
        largest_segment: largest,
        largest_segment_percentage: if total > 0 {
            (largest as f64 / total as f64) * 100.0
        } else {
            0.0
        },
    }
}

impl SegmentDistribution {
    /// True if a single segment holds more than half the cohort
    pub fn is_highly_concentrated(&self) -> bool {
        self.largest_segment_percentage > 50.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} records | Segments: {} | Mean: {} | Median: {} | Largest: {:.1}%",
            self.total_records,
            self.segment_count,
            self.mean_per_segment,
            self.median_per_segment,
            self.largest_segment_percentage
        )
    }
}
