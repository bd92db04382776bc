//! Spreadsheet reader for coordinate imports
//!
//! Reads the first worksheet of an Excel or OpenDocument file; its first row
//! holds the column names.

use calamine::{open_workbook_auto, Data, Reader};
use log::info;

use crate::dataset::{Cell, TabularData};
use crate::errors::{CoordError, CoordResult};

/// File extensions handled by the spreadsheet reader
pub const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Read the first worksheet into column names and rows
pub fn read_spreadsheet(path: &str) -> CoordResult<TabularData> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0)
        .ok_or_else(|| CoordError::GenericError(format!("Spreadsheet {} has no worksheets", path)))??;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|cell| cell.to_string().trim().to_string()).collect(),
        None => Vec::new(),
    };
    let rows: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(to_cell).collect()).collect();

    info!("Read {} rows with columns [{}] from {}", rows.len(), columns.join(", "), path);
    Ok(TabularData::new(columns, rows))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::String(text) => Cell::from(text.as_str()),
        Data::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    #[test]
    fn test_reads_first_sheet_with_header() {
        let table = read_spreadsheet(&fixture("puntos.xlsx")).unwrap();
        assert_eq!(table.columns, vec!["Longitud", "Latitud"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], Cell::Number(-74.08));
        assert_eq!(table.rows[1][1], Cell::Number(4.65));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(to_cell(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(to_cell(&Data::String("  ".to_string())), Cell::Empty);
        assert_eq!(to_cell(&Data::String("4,6".to_string())), Cell::Text("4,6".to_string()));
        assert_eq!(to_cell(&Data::Bool(true)), Cell::Text("true".to_string()));
    }

    #[test]
    fn test_missing_file_is_spreadsheet_error() {
        assert!(matches!(
            read_spreadsheet(&fixture("missing.xlsx")),
            Err(CoordError::SpreadsheetError(_))
        ));
    }
}
