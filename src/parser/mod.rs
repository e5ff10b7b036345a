//! Dataset parsing and schema definitions.
//!
//! This module handles:
//! - Reading the semicolon-delimited student dataset
//! - Validating that required columns exist
//! - Defining the output summary schema

pub mod schema;
pub mod student;

// Re-export main types
pub use schema::{to_summary, CohortBreakdown, Segment, Summary};
pub use student::{read_students, read_students_from_reader, StudentRecord};
