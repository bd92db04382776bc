//! Column role detection for tabular imports

use log::debug;

use super::set::validate_value;
use crate::errors::{CoordError, CoordResult};

/// Accepted column pairings, checked in this order
///
/// Names match case-insensitively after trimming surrounding whitespace.
pub const COLUMN_PAIRINGS: [(&str, &str); 2] = [
    ("x", "y"),
    ("longitud", "latitud"),
];

/// A single cell of externally parsed tabular data
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Numeric value of the cell, `None` when it is not a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }

    fn display(&self) -> String {
        match self {
            Cell::Number(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Empty => String::new(),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

/// Column names plus rows, as handed over by a spreadsheet or text reader
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TabularData {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        TabularData { columns, rows }
    }
}

/// Positions of the X and Y columns in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    pub x: usize,
    pub y: usize,
}

/// Find which columns hold X and Y values
pub fn detect_columns(columns: &[String]) -> CoordResult<ColumnRoles> {
    let normalized: Vec<String> = columns.iter().map(|c| c.trim().to_lowercase()).collect();
    let position = |name: &str| normalized.iter().position(|c| c == name);

    for (x_name, y_name) in COLUMN_PAIRINGS {
        if let (Some(x), Some(y)) = (position(x_name), position(y_name)) {
            debug!("Detected coordinate columns '{}' and '{}'", columns[x], columns[y]);
            return Ok(ColumnRoles { x, y });
        }
    }

    Err(CoordError::Schema(columns.to_vec()))
}

/// Extract validated (x, y) pairs from every row of a table
///
/// The first row with a missing or non-numeric coordinate is reported with
/// its row index and column name.
pub fn extract_pairs(table: &TabularData) -> CoordResult<Vec<(f64, f64)>> {
    let roles = detect_columns(&table.columns)?;

    table.rows.iter().enumerate().map(|(row, cells)| {
        let x = cell_value(cells, roles.x, &table.columns[roles.x], row)?;
        let y = cell_value(cells, roles.y, &table.columns[roles.y], row)?;
        Ok((x, y))
    }).collect()
}

fn cell_value(cells: &[Cell], column: usize, name: &str, row: usize) -> CoordResult<f64> {
    let parsed = cells.get(column).map(|cell| (cell.as_f64(), cell.display()));
    match parsed {
        Some((Some(value), _)) => validate_value(value, name, Some(row)),
        Some((None, text)) => Err(CoordError::Validation {
            row: Some(row),
            field: name.to_string(),
            value: text,
        }),
        None => Err(CoordError::Validation {
            row: Some(row),
            field: name.to_string(),
            value: String::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_detect_xy_and_spanish_names() {
        assert_eq!(detect_columns(&names(&["id", "X", "y"])).unwrap(), ColumnRoles { x: 1, y: 2 });
        assert_eq!(detect_columns(&names(&["Latitud", "LONGITUD"])).unwrap(), ColumnRoles { x: 1, y: 0 });
        assert_eq!(detect_columns(&names(&[" x ", "y"])).unwrap(), ColumnRoles { x: 0, y: 1 });
    }

    #[test]
    fn test_xy_takes_priority() {
        let roles = detect_columns(&names(&["longitud", "latitud", "x", "y"])).unwrap();
        assert_eq!(roles, ColumnRoles { x: 2, y: 3 });
    }

    #[test]
    fn test_unknown_columns_are_schema_error() {
        assert!(matches!(detect_columns(&names(&["lon", "lat"])), Err(CoordError::Schema(_))));
        assert!(matches!(detect_columns(&names(&["x", "latitud"])), Err(CoordError::Schema(_))));
    }

    #[test]
    fn test_extract_pairs_reports_bad_row() {
        let table = TabularData::new(
            names(&["X", "Y"]),
            vec![
                vec![Cell::from(-74.0), Cell::from("4.6")],
                vec![Cell::from("abc"), Cell::from(4.7)],
            ],
        );
        match extract_pairs(&table) {
            Err(CoordError::Validation { row, field, value }) => {
                assert_eq!(row, Some(1));
                assert_eq!(field, "X");
                assert_eq!(value, "abc");
            },
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_pairs_missing_cell() {
        let table = TabularData::new(names(&["x", "y"]), vec![vec![Cell::from(1.0)]]);
        assert!(matches!(extract_pairs(&table), Err(CoordError::Validation { row: Some(0), .. })));
    }
}
