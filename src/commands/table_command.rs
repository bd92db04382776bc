//! Table and clipboard-text command
//!
//! Transforms the loaded coordinates and prints either the full table or the
//! `x,y` text of one column, ready to paste elsewhere.

use clap::ArgMatches;
use log::info;

use super::column_arg;
use crate::api::CoordKit;
use crate::commands::command_traits::Command;
use crate::dataset::CoordinateColumn;
use crate::errors::{CoordError, CoordResult};

/// Command printing the coordinate table or copy text
pub struct TableCommand {
    session: CoordKit,
    /// Column to print as `x,y` lines instead of the table
    copy: Option<CoordinateColumn>,
    /// 0-based row restricting the copy text
    row: Option<usize>,
}

impl TableCommand {
    pub fn new(args: &ArgMatches, session: CoordKit) -> CoordResult<Self> {
        let copy = column_arg(args, "copy")?;

        let row = match args.get_one::<String>("row") {
            Some(value) => {
                let position = value.trim().parse::<usize>()
                    .map_err(|_| CoordError::GenericError(format!("Invalid row number: {}", value)))?;
                if position == 0 {
                    return Err(CoordError::GenericError("Row numbers start at 1".to_string()));
                }
                Some(position - 1)
            },
            None => None,
        };

        Ok(TableCommand { session, copy, row })
    }
}

impl Command for TableCommand {
    fn execute(&mut self) -> CoordResult<()> {
        if self.copy != Some(CoordinateColumn::Source) {
            self.session.transform()?;
        }

        match (self.copy, self.row) {
            (Some(which), Some(row)) => println!("{}", self.session.copy_row(row, which)?),
            (Some(which), None) => print!("{}", self.session.copy_text(which)?),
            (None, _) => {
                println!("N°\tX\tY\tX Transformado\tY Transformado");
                for row in self.session.rows() {
                    println!("{}\t{}\t{}\t{}\t{}", row.position, row.x, row.y, row.x_target, row.y_target);
                }
            },
        }

        info!("Printed {} coordinates", self.session.controller().dataset().len());
        Ok(())
    }
}
