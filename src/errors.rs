//! Custom error types for coordinate handling
//!
//! Every failure the dataset operations can produce is a distinct variant so
//! the presentation layer can show an accurate message instead of a generic one.

use std::fmt;
use std::io;

use crate::coordinate::SpatialReference;

/// Errors raised by the dataset, projection and export layers
#[derive(Debug)]
pub enum CoordError {
    /// I/O error
    IoError(io::Error),
    /// Delimited text could not be parsed
    CsvError(csv::Error),
    /// Spreadsheet could not be opened or read
    SpreadsheetError(calamine::Error),
    /// A coordinate value is not a finite number
    Validation {
        /// Row of the offending value, when it came from an import
        row: Option<usize>,
        /// Field or column name
        field: String,
        /// The rejected value as text
        value: String,
    },
    /// Neither the X/Y nor the longitud/latitud column pairing was found
    Schema(Vec<String>),
    /// The operation needs at least one record
    EmptyDataset,
    /// The operation needs transformed coordinates
    NotYetTransformed {
        /// First row without transformed coordinates, if some rows have them
        row: Option<usize>,
    },
    /// No definition is known for the EPSG code
    UnsupportedReference(u32),
    /// A point could not be reprojected
    Transform {
        /// Position of the point in the input arrays
        index: usize,
        x: f64,
        y: f64,
        reason: String,
    },
    /// Stored targets belong to a different destination than the one requested
    ReferenceMismatch {
        /// Destination of the last transform run
        transformed: SpatialReference,
        /// Destination the caller asked for
        requested: SpatialReference,
    },
    /// Row selection outside the current bounds
    IndexOutOfRange { index: usize, len: usize },
    /// The selected row has no coordinates for the requested column
    NoDataToCopy { index: usize },
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::IoError(e) => write!(f, "I/O error: {}", e),
            CoordError::CsvError(e) => write!(f, "Could not read tabular data: {}", e),
            CoordError::SpreadsheetError(e) => write!(f, "Could not read spreadsheet: {}", e),
            CoordError::Validation { row: Some(row), field, value } => {
                write!(f, "Invalid numeric value '{}' for {} in data row {}", value, field, row + 1)
            },
            CoordError::Validation { row: None, field, value } => {
                write!(f, "Invalid numeric value '{}' for {}", value, field)
            },
            CoordError::Schema(columns) => write!(
                f,
                "Invalid columns [{}]: expected X/Y or Longitud/Latitud",
                columns.join(", ")
            ),
            CoordError::EmptyDataset => write!(f, "No coordinates loaded"),
            CoordError::NotYetTransformed { row: Some(row) } => {
                write!(f, "Row {} has not been transformed yet", row + 1)
            },
            CoordError::NotYetTransformed { row: None } => {
                write!(f, "Coordinates must be transformed first")
            },
            CoordError::UnsupportedReference(code) => write!(f, "Unsupported reference system: EPSG:{}", code),
            CoordError::Transform { index, x, y, reason } => {
                write!(f, "Cannot transform point #{} ({}, {}): {}", index + 1, x, y, reason)
            },
            CoordError::ReferenceMismatch { transformed, requested } => write!(
                f,
                "Coordinates were transformed to {} but {} is selected; transform again",
                transformed, requested
            ),
            CoordError::IndexOutOfRange { index, len } => {
                write!(f, "Row index {} out of range (dataset has {} rows)", index, len)
            },
            CoordError::NoDataToCopy { index } => {
                write!(f, "No coordinates available to copy in row {}", index + 1)
            },
            CoordError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CoordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoordError::IoError(e) => Some(e),
            CoordError::CsvError(e) => Some(e),
            CoordError::SpreadsheetError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CoordError {
    fn from(error: io::Error) -> Self {
        CoordError::IoError(error)
    }
}

impl From<csv::Error> for CoordError {
    fn from(error: csv::Error) -> Self {
        CoordError::CsvError(error)
    }
}

impl From<calamine::Error> for CoordError {
    fn from(error: calamine::Error) -> Self {
        CoordError::SpreadsheetError(error)
    }
}

impl From<String> for CoordError {
    fn from(msg: String) -> Self {
        CoordError::GenericError(msg)
    }
}

/// Result type for coordinate operations
pub type CoordResult<T> = Result<T, CoordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_reports_one_based_data_row() {
        let err = CoordError::Validation {
            row: Some(2),
            field: "Latitud".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid numeric value 'abc' for Latitud in data row 3");
    }

    #[test]
    fn test_reference_mismatch_message_names_both_systems() {
        let err = CoordError::ReferenceMismatch {
            transformed: SpatialReference::ColombiaBogota,
            requested: SpatialReference::OrigenNacional,
        };
        let message = err.to_string();
        assert!(message.contains("EPSG:3116"));
        assert!(message.contains("EPSG:9377"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: CoordError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, CoordError::IoError(_)));
    }
}
