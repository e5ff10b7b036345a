//! Output JSON schema definitions for summary data.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input file the summary was built from
    pub source: String,

    /// Total number of student records
    pub total_students: u64,

    /// Per-dimension label counts
    pub breakdown: CohortBreakdown,

    /// Largest segments (ranked by record count)
    pub top_segments: Vec<Segment>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

/// Marginal counts for each grouping dimension
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CohortBreakdown {
    pub by_debt: HashMap<String, u64>,
    pub by_tuition: HashMap<String, u64>,
    pub by_scholarship: HashMap<String, u64>,
    pub by_outcome: HashMap<String, u64>,
}

/// A fully-specified segment of the cohort (one label per dimension)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Label path as semicolon-separated string
    /// (e.g. "Has Debt;Tuition Not Up to Date;Holds Scholarship;Graduate")
    pub path: String,

    /// Number of records in this segment
    pub count: u64,

    /// Percentage of the total cohort
    pub percentage: f64,
}

/// Assemble the final summary document
///
/// **Public** - used by commands to create the output file
pub fn to_summary(
    source: &str,
    total_students: u64,
    breakdown: CohortBreakdown,
    top_segments: Vec<Segment>,
) -> Summary {
    use chrono::Utc;

    Summary {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        total_students,
        breakdown,
        top_segments,
        generated_at: Utc::now().to_rfc3339(),
    }
}
