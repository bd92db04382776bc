//! Delimited text reader for coordinate imports
//!
//! Reads `.csv` and `.txt` files with a header row. Comma is tried first;
//! when that yields a single column the file is read again with `;`.
//! Spreadsheet files are handed to the spreadsheet reader.

use std::fs;
use std::path::Path;
use log::{debug, info};

use super::spreadsheet_reader::{read_spreadsheet, SPREADSHEET_EXTENSIONS};
use crate::dataset::{Cell, TabularData};
use crate::errors::CoordResult;

/// Read a delimited text or spreadsheet file into column names and rows
pub fn read_table(path: &str) -> CoordResult<TabularData> {
    let extension = Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        return read_spreadsheet(path);
    }

    let content = fs::read_to_string(path)?;
    let table = parse_delimited(&content)?;
    info!("Read {} rows with columns [{}] from {}", table.rows.len(), table.columns.join(", "), path);
    Ok(table)
}

/// Parse delimited text, falling back from `,` to `;`
pub fn parse_delimited(content: &str) -> CoordResult<TabularData> {
    let content = content.trim_start_matches('\u{feff}');
    let table = parse_with(content, b',')?;

    if table.columns.len() <= 1 && content.contains(';') {
        debug!("Comma parse produced a single column, retrying with ';'");
        return parse_with(content, b';');
    }

    Ok(table)
}

fn parse_with(content: &str, delimiter: u8) -> CoordResult<TabularData> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells = record.iter().map(|value| {
            // Semicolon files usually come from locales writing decimal commas
            if delimiter == b';' {
                decimal_comma_cell(value)
            } else {
                Cell::from(value)
            }
        }).collect();
        rows.push(cells);
    }

    Ok(TabularData::new(columns, rows))
}

fn decimal_comma_cell(value: &str) -> Cell {
    if value.matches(',').count() == 1 && !value.contains('.') {
        if let Ok(number) = value.replace(',', ".").parse::<f64>() {
            return Cell::Number(number);
        }
    }
    Cell::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated() {
        let table = parse_delimited("Longitud,Latitud\n-74.08,4.60\n-74.1,4.7\n").unwrap();
        assert_eq!(table.columns, vec!["Longitud", "Latitud"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0].as_f64(), Some(-74.08));
    }

    #[test]
    fn test_semicolon_fallback_with_decimal_comma() {
        let table = parse_delimited("x;y\n-74,08;4,60\n1000.5;2000\n").unwrap();
        assert_eq!(table.columns, vec!["x", "y"]);
        assert_eq!(table.rows[0][0], Cell::Number(-74.08));
        assert_eq!(table.rows[1][0].as_f64(), Some(1000.5));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let table = parse_delimited("\u{feff}X,Y\n1,2\n").unwrap();
        assert_eq!(table.columns[0], "X");
    }

    #[test]
    fn test_empty_cells() {
        let table = parse_delimited("x,y\n1,\n").unwrap();
        assert_eq!(table.rows[0][1], Cell::Empty);
    }

    #[test]
    fn test_spreadsheet_extension_dispatch() {
        let path = format!("{}/tests/fixtures/puntos.xlsx", env!("CARGO_MANIFEST_DIR"));
        let table = read_table(&path).unwrap();
        assert_eq!(table.columns, vec!["Longitud", "Latitud"]);
        assert_eq!(table.rows.len(), 2);
    }
}
