//! Label derivation for the four grouping dimensions.
//!
//! The three binary indicators map "1" (after trimming) to their positive
//! label and anything else to the negative label. The outcome column is
//! matched against the known set; unexpected values become `Unknown`.
//!
//! Derivation is a pure mapping: raw records are never mutated, the output
//! is a fresh `LabeledStudent` per row.

use crate::parser::student::StudentRecord;
use crate::utils::error::ParseError;
use serde::{Deserialize, Serialize};

/// Debt status derived from the `Debtor` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebtStatus {
    HasDebt,
    NoDebt,
}

impl DebtStatus {
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim() == "1" {
            Self::HasDebt
        } else {
            Self::NoDebt
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HasDebt => "Has Debt",
            Self::NoDebt => "No Debt",
        }
    }
}

/// Tuition payment status derived from the `Tuition fees up to date` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TuitionStatus {
    UpToDate,
    NotUpToDate,
}

impl TuitionStatus {
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim() == "1" {
            Self::UpToDate
        } else {
            Self::NotUpToDate
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpToDate => "Tuition Up to Date",
            Self::NotUpToDate => "Tuition Not Up to Date",
        }
    }
}

/// Scholarship status derived from the `Scholarship holder` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScholarshipStatus {
    Holder,
    NonHolder,
}

impl ScholarshipStatus {
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim() == "1" {
            Self::Holder
        } else {
            Self::NonHolder
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Holder => "Holds Scholarship",
            Self::NonHolder => "No Scholarship",
        }
    }
}

/// Student outcome derived from the `Target` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Graduate,
    Dropout,
    Enrolled,
    Unknown,
}

impl std::str::FromStr for Outcome {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "graduate" => Self::Graduate,
            "dropout" => Self::Dropout,
            "enrolled" => Self::Enrolled,
            _ => Self::Unknown,
        })
    }
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Graduate => "Graduate",
            Self::Dropout => "Dropout",
            Self::Enrolled => "Enrolled",
            Self::Unknown => "Unknown",
        }
    }

    /// True for the three outcomes the dataset documents
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// A record decorated with one derived label per dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledStudent {
    pub debt: DebtStatus,
    pub tuition: TuitionStatus,
    pub scholarship: ScholarshipStatus,
    pub outcome: Outcome,
}

impl LabeledStudent {
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            debt: DebtStatus::from_raw(&record.debtor),
            tuition: TuitionStatus::from_raw(&record.tuition_fees_up_to_date),
            scholarship: ScholarshipStatus::from_raw(&record.scholarship_holder),
            // Infallible parse, unexpected values fall through to Unknown
            outcome: record.target.parse().unwrap_or(Outcome::Unknown),
        }
    }
}

/// Derive labels for every record
///
/// **Public** - default policy: unexpected outcome values are kept and
/// mapped to the `Unknown` category.
pub fn label_records(records: &[StudentRecord]) -> Vec<LabeledStudent> {
    records.iter().map(LabeledStudent::from_record).collect()
}

/// Derive labels, rejecting records with an unexpected outcome value
///
/// **Public** - strict policy, used when the caller passed `--strict`.
///
/// # Errors
/// * `ParseError::MalformedRecord` - names the first offending row (1-based,
///   counting data rows) and the raw value
pub fn label_records_strict(records: &[StudentRecord]) -> Result<Vec<LabeledStudent>, ParseError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let labeled = LabeledStudent::from_record(record);
            if labeled.outcome.is_known() {
                Ok(labeled)
            } else {
                Err(ParseError::MalformedRecord {
                    row: index + 1,
                    value: record.target.trim().to_string(),
                })
            }
        })
        .collect()
}
