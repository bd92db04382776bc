//! Input handling
//!
//! Readers that turn files into tabular data for the dataset import.

pub mod table_reader;
pub mod spreadsheet_reader;

pub use table_reader::{parse_delimited, read_table};
pub use spreadsheet_reader::read_spreadsheet;
