//! Aggregation of student records into nested counts and metrics.
//!
//! This module transforms raw records into:
//! - Derived categorical labels (one per grouping dimension)
//! - A nested frequency count over the four dimensions
//! - Segment metrics (largest groups, concentration statistics)

pub mod frequency;
pub mod labels;
pub mod metrics;

// Re-export main types and functions
pub use frequency::{build_frequency_tree, default_dimensions, FrequencyNode, LabelFn};
pub use labels::{
    label_records, label_records_strict, DebtStatus, LabeledStudent, Outcome,
    ScholarshipStatus, TuitionStatus,
};
pub use metrics::{
    calculate_segment_distribution, calculate_top_segments, CohortStats, SegmentDistribution,
};
