//! Reader for the semicolon-delimited student dataset.
//!
//! The input file has a header row; the four columns we care about are
//! addressed by exact header name. Everything else in the row is ignored.

use crate::utils::config::{INPUT_DELIMITER, REQUIRED_COLUMNS};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One raw input row.
///
/// The indicator fields are binary-coded strings ("1"/"0") as they appear in
/// the file; label derivation happens later in the aggregator.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRecord {
    /// Raw debt indicator
    #[serde(rename = "Debtor")]
    pub debtor: String,

    /// Raw tuition-payment indicator
    #[serde(rename = "Tuition fees up to date")]
    pub tuition_fees_up_to_date: String,

    /// Raw scholarship indicator
    #[serde(rename = "Scholarship holder")]
    pub scholarship_holder: String,

    /// Raw outcome label (e.g. "Graduate", "Dropout", "Enrolled")
    #[serde(rename = "Target")]
    pub target: String,
}

/// Read student records from a file path
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::IoError` - file cannot be opened
/// * `ParseError::MissingColumn` - a required column is absent from the header
/// * `ParseError::CsvError` - a row fails to parse
pub fn read_students(path: impl AsRef<Path>) -> Result<Vec<StudentRecord>, ParseError> {
    let path = path.as_ref();
    debug!("Reading student dataset from: {}", path.display());

    let file = File::open(path)?;
    read_students_from_reader(BufReader::new(file))
}

/// Read student records from any reader (used directly by tests)
pub fn read_students_from_reader<R: Read>(reader: R) -> Result<Vec<StudentRecord>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(INPUT_DELIMITER)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    validate_headers(rdr.headers()?)?;

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: StudentRecord = result?;
        records.push(record);
    }

    if records.is_empty() {
        warn!("Dataset contains a header row but no records");
    }

    debug!("Read {} student records", records.len());
    Ok(records)
}

/// Check that every required column is present in the header row
///
/// **Private** - internal validation; a missing column fails the whole load
/// rather than silently producing garbage labels downstream.
fn validate_headers(headers: &csv::StringRecord) -> Result<(), ParseError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(ParseError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Debtor;Tuition fees up to date;Scholarship holder;Target";

    #[test]
    fn test_read_valid_rows() {
        let data = format!("{}\n1;0;1;Graduate\n0;1;0;Dropout\n", HEADER);
        let records = read_students_from_reader(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].debtor, "1");
        assert_eq!(records[0].target, "Graduate");
        assert_eq!(records[1].tuition_fees_up_to_date, "1");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let data = "Age;Debtor;Tuition fees up to date;Scholarship holder;Target\n\
                    20;1;1;0;Enrolled\n";
        let records = read_students_from_reader(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scholarship_holder, "0");
        assert_eq!(records[0].target, "Enrolled");
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let data = "Debtor;Scholarship holder;Target\n1;1;Graduate\n";
        let err = read_students_from_reader(data.as_bytes()).unwrap_err();

        match err {
            ParseError::MissingColumn(col) => assert_eq!(col, "Tuition fees up to date"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_input() {
        let data = format!("{}\n", HEADER);
        let records = read_students_from_reader(data.as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
